//! Discourse coherence from consecutive-sentence embedding similarity

use tracing::{debug, warn};

use crate::semantic::{cosine_similarity, EmbedderHandle};
use crate::text::sentences;

/// Threshold below which a sentence pair is flagged as a coherence issue
const ISSUE_THRESHOLD: f64 = 0.3;

/// A low-similarity transition between consecutive sentences
#[derive(Debug, Clone)]
pub struct CoherenceIssue {
    /// Index of the sentence that broke coherence with its predecessor
    pub sentence_index: usize,
    /// That sentence's text, trimmed
    pub sentence: String,
    /// Cosine similarity with the previous sentence
    pub similarity: f64,
}

/// Result of the coherence branch
///
/// Always usable: failures and too-short transcripts yield the neutral
/// score with the reason recorded, never an error.
#[derive(Debug, Clone)]
pub struct CoherenceAnalysis {
    /// Coherence score out of 10
    pub score: f64,
    /// Mean consecutive-sentence similarity, when computed
    pub average: Option<f64>,
    /// Flagged low-similarity transitions
    pub issues: Vec<CoherenceIssue>,
    /// Number of sentences analyzed
    pub sentence_count: usize,
    /// True when the transcript had fewer than two sentences
    pub too_short: bool,
    /// Why the analysis degraded, if it did
    pub fallback_reason: Option<String>,
}

impl CoherenceAnalysis {
    /// Neutral result used when the analysis cannot run
    pub fn neutral(reason: &str) -> Self {
        Self {
            score: 5.0,
            average: None,
            issues: Vec::new(),
            sentence_count: 0,
            too_short: false,
            fallback_reason: Some(reason.to_string()),
        }
    }
}

/// Score how well consecutive sentences hang together
///
/// Fewer than two sentences is neutral 5 with the too-short flag and no
/// model call. Otherwise the score is `round(mean_similarity * 10)`
/// clamped to [2, 10], and pairs under the issue threshold are flagged
/// with the offending sentence text.
pub async fn analyze(text: &str, embedder: &EmbedderHandle) -> CoherenceAnalysis {
    let sentence_list: Vec<String> = sentences(text).iter().map(|s| s.to_string()).collect();

    if sentence_list.len() < 2 {
        return CoherenceAnalysis {
            score: 5.0,
            average: None,
            issues: Vec::new(),
            sentence_count: sentence_list.len(),
            too_short: true,
            fallback_reason: None,
        };
    }

    let embeddings = match embedder.get().await {
        Ok(embedder) => match embedder.embed(&sentence_list).await {
            Ok(vectors) if vectors.len() == sentence_list.len() => vectors,
            Ok(vectors) => {
                warn!(
                    expected = sentence_list.len(),
                    got = vectors.len(),
                    "embedder returned wrong vector count"
                );
                return CoherenceAnalysis::neutral("embedder returned wrong vector count");
            }
            Err(e) => {
                warn!(error = %e, "coherence analysis failed");
                return CoherenceAnalysis::neutral(&e.to_string());
            }
        },
        Err(e) => {
            warn!(error = %e, "embedder unavailable");
            return CoherenceAnalysis::neutral(&e.to_string());
        }
    };

    let mut similarity_sum = 0.0;
    let mut issues = Vec::new();
    for i in 0..sentence_list.len() - 1 {
        let similarity = cosine_similarity(&embeddings[i], &embeddings[i + 1]);
        similarity_sum += similarity;
        if similarity < ISSUE_THRESHOLD {
            issues.push(CoherenceIssue {
                sentence_index: i + 1,
                sentence: sentence_list[i + 1].clone(),
                similarity,
            });
        }
    }

    let average = similarity_sum / (sentence_list.len() - 1) as f64;
    let score = (average * 10.0).round().clamp(2.0, 10.0);
    debug!(average, score, issues = issues.len(), "coherence analysis complete");

    CoherenceAnalysis {
        score,
        average: Some(average),
        issues,
        sentence_count: sentence_list.len(),
        too_short: false,
        fallback_reason: None,
    }
}
