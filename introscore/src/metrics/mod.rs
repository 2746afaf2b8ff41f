//! Metric evaluators
//!
//! Each evaluator is a pure function from a prepared [`EvalContext`] to
//! a [`MetricScore`]. The dispatcher maps a rubric [`MetricDef`] to the
//! matching evaluator, so the set of metrics a request runs is entirely
//! rubric-driven.

pub mod content;
pub mod delivery;
pub mod engagement;
pub mod language;
pub mod tone;

use crate::rubric::{MetricDef, MetricId, WordLists};
use crate::semantic::coherence::CoherenceAnalysis;
use crate::sentiment::{self, SentimentSummary};
use crate::text;
use crate::types::MetricScore;

/// Precomputed per-request inputs shared by every evaluator
pub struct EvalContext<'a> {
    /// Original transcript
    pub text: &'a str,
    /// Lowercased transcript, computed once
    pub lower: String,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Rounded words per minute
    pub speech_rate: u32,
    /// Lexicon sentiment hit counts
    pub sentiment: SentimentSummary,
}

impl<'a> EvalContext<'a> {
    pub fn new(text: &'a str, duration_seconds: f64, words: &WordLists) -> Self {
        let lower = text.to_lowercase();
        let word_count = text::word_count(text);
        let speech_rate = text::speech_rate(word_count, duration_seconds);
        let sentiment = sentiment::analyze(&lower, &words.positive_words, &words.negative_words);
        Self {
            text,
            lower,
            word_count,
            speech_rate,
            sentiment,
        }
    }
}

/// Evaluate one rubric metric
///
/// `coherence` is only consulted by the Flow & Coherence blend; the
/// caller computes it once per request (or passes `None` on the basic
/// path, where that metric does not appear).
pub fn evaluate(
    def: &MetricDef,
    ctx: &EvalContext<'_>,
    words: &WordLists,
    coherence: Option<&CoherenceAnalysis>,
) -> MetricScore {
    match def.id {
        MetricId::Salutation => content::salutation(def, ctx),
        MetricId::KeywordPresence => content::keyword_presence(def, ctx, words),
        MetricId::Flow => content::flow(def, ctx),
        MetricId::FlowCoherence => content::flow_coherence(def, ctx, coherence),
        MetricId::SpeechRate => delivery::speech_rate(def, ctx),
        MetricId::FillerWordRate => delivery::filler_word_rate(def, ctx, words),
        MetricId::GrammarErrors => language::grammar_errors(def, ctx, words),
        MetricId::VocabularyRichness => language::vocabulary_richness(def, ctx),
        MetricId::SentimentPositivity => engagement::sentiment_positivity(def, ctx),
        MetricId::Politeness => tone::politeness(def, ctx, words),
        MetricId::Professionalism => tone::professionalism(def, ctx, words),
    }
}
