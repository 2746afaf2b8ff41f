//! Lexicon-based sentiment scorer
//!
//! Counts positive and negative word hits over the transcript's
//! alphabetic tokens. Duplicate occurrences count separately, matching
//! how wordlist sentiment analyzers tally hits.

use tracing::debug;

use crate::text::alphabetic_tokens;

/// Positive/negative hit counts for one transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentSummary {
    /// Number of positive word occurrences
    pub positive: usize,
    /// Number of negative word occurrences
    pub negative: usize,
}

impl SentimentSummary {
    /// Positivity ratio `positive / (positive + negative)`
    ///
    /// Neutral 0.5 when there are no positive hits at all, so a
    /// transcript with no emotional language is neither rewarded nor
    /// punished.
    pub fn positivity(&self) -> f64 {
        if self.positive > 0 {
            self.positive as f64 / (self.positive + self.negative) as f64
        } else {
            0.5
        }
    }
}

/// Count sentiment word hits in a lowercased transcript
pub fn analyze(lower: &str, positive_words: &[String], negative_words: &[String]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    for token in alphabetic_tokens(lower) {
        if positive_words.iter().any(|w| w == token) {
            summary.positive += 1;
        } else if negative_words.iter().any(|w| w == token) {
            summary.negative += 1;
        }
    }
    debug!(
        positive = summary.positive,
        negative = summary.negative,
        "sentiment analysis complete"
    );
    summary
}
