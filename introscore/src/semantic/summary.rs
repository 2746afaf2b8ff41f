//! Extractive summary and core-message density
//!
//! The summary picks the most informative sentences by keyword hits
//! plus a position-centrality bonus, then the density check asks how
//! many required core-message keywords survive into that summary.

use tracing::debug;

use crate::text::sentences;
use crate::types::ConcisenessAnalysis;

/// Maximum sentences kept in the summary
const MAX_SUMMARY_SENTENCES: usize = 4;

/// Build an extractive summary of the transcript
///
/// Each sentence scores +2 per summary keyword it contains plus a
/// centrality bonus `1 - |i - n/2| / (n/2)`; the top sentences are kept
/// in their original order, joined with ". " and a trailing period.
pub fn extractive_summary(text: &str, summary_keywords: &[String]) -> String {
    let sentence_list = sentences(text);
    if sentence_list.is_empty() {
        return String::new();
    }

    let n = sentence_list.len() as f64;
    let mut scored: Vec<(usize, f64, &str)> = sentence_list
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let lower = sentence.to_lowercase();
            let mut score = 0.0;
            for keyword in summary_keywords {
                if lower.contains(keyword.as_str()) {
                    score += 2.0;
                }
            }
            let half = n / 2.0;
            if half > 0.0 {
                score += 1.0 - (i as f64 - half).abs() / half;
            }
            (i, score, *sentence)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut top: Vec<(usize, f64, &str)> = scored
        .into_iter()
        .take(MAX_SUMMARY_SENTENCES.min(sentence_list.len()))
        .collect();
    top.sort_by_key(|(i, _, _)| *i);

    let joined = top
        .iter()
        .map(|(_, _, sentence)| *sentence)
        .collect::<Vec<_>>()
        .join(". ");
    format!("{}.", joined)
}

/// Measure how much of the core message survives into the summary
///
/// Density is `max(0, 10 - 2 * missing)` over the required keyword
/// list, with missing determined by case-insensitive substring tests
/// against the summary.
pub fn core_message_density(
    transcript: &str,
    summary: &str,
    required_keywords: &[String],
) -> ConcisenessAnalysis {
    let summary_lower = summary.to_lowercase();
    let missing_keywords: Vec<String> = required_keywords
        .iter()
        .filter(|k| !summary_lower.contains(k.to_lowercase().as_str()))
        .cloned()
        .collect();

    let density = (10.0 - 2.0 * missing_keywords.len() as f64).max(0.0);
    let coverage = if required_keywords.is_empty() {
        1.0
    } else {
        (required_keywords.len() - missing_keywords.len()) as f64 / required_keywords.len() as f64
    };
    let compression = if transcript.is_empty() {
        0.0
    } else {
        summary.len() as f64 / transcript.len() as f64
    };
    debug!(density, missing = missing_keywords.len(), "core message density");

    ConcisenessAnalysis {
        original_length: transcript.len(),
        summary: summary.to_string(),
        core_message_density: density,
        missing_keywords,
        compression_ratio: compression,
        keyword_coverage: coverage,
    }
}
