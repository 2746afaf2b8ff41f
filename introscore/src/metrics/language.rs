//! Language & Grammar evaluators
//!
//! The grammar check is a shallow syntactic proxy by contract: four
//! surface detectors over the raw text, never a parser. Vocabulary
//! richness is a plain type-token ratio.

use std::collections::BTreeSet;

use tracing::debug;

use crate::rubric::{MetricDef, WordLists};
use crate::text::{alphabetic_tokens, sentences, trim_punctuation};
use crate::types::{MetricInsights, MetricScore};

use super::EvalContext;

/// Count surface grammar flaws: doubled whitespace, doubled punctuation,
/// sentences not opening with a capital, apostrophe-dropped contractions
pub fn count_grammar_errors(text: &str, lower: &str, words: &WordLists) -> usize {
    let mut errors = 0usize;

    // Whitespace runs of length >= 2, one error per run
    let mut run = 0usize;
    for c in text.chars() {
        if c.is_whitespace() {
            run += 1;
            if run == 2 {
                errors += 1;
            }
        } else {
            run = 0;
        }
    }

    // Runs of commas/periods of length >= 2, one error per run
    let mut run = 0usize;
    for c in text.chars() {
        if c == ',' || c == '.' {
            run += 1;
            if run == 2 {
                errors += 1;
            }
        } else {
            run = 0;
        }
    }

    // Sentences whose first character is not an uppercase ASCII letter
    for sentence in sentences(text) {
        if let Some(first) = sentence.chars().next() {
            if !first.is_ascii_uppercase() {
                errors += 1;
            }
        }
    }

    // Apostrophe-dropped contraction tokens ("dont", "im", ...)
    for word in lower.split_whitespace() {
        let trimmed = trim_punctuation(word);
        if words
            .dropped_apostrophe_tokens
            .iter()
            .any(|t| t == trimmed)
        {
            errors += 1;
        }
    }

    errors
}

/// Banded grammar error density score
///
/// `per100 = errors / words * 100`, `g = max(0, 1 - min(per100/10, 1))`.
pub fn grammar_errors(def: &MetricDef, ctx: &EvalContext<'_>, words: &WordLists) -> MetricScore {
    let Some(bands) = &def.bands else {
        return missing_bands(def);
    };

    let error_count = count_grammar_errors(ctx.text, &ctx.lower, words);
    let per_100 = if ctx.word_count > 0 {
        error_count as f64 / ctx.word_count as f64 * 100.0
    } else {
        0.0
    };
    let grammar_score = (1.0 - (per_100 / 10.0).min(1.0)).max(0.0);
    debug!(error_count, grammar_score, "grammar analysis");

    let hit = bands.lookup(grammar_score);
    let details = if hit.miss {
        hit.level.to_string()
    } else {
        format!(
            "{}: {} errors detected, score: {:.2}",
            hit.level, error_count, grammar_score
        )
    };

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Grammar analysis revealed {} issues in {} words ({:.1} errors per 100 words)",
            error_count, ctx.word_count, per_100
        )),
        recommendations: if error_count > 2 {
            vec![
                "Check for proper capitalization at sentence beginnings".into(),
                "Review for double spaces or punctuation".into(),
                "Ensure proper verb usage and sentence structure".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if error_count == 0 {
            vec![
                "Excellent grammar with no detected errors".into(),
                "Professional level writing quality".into(),
            ]
        } else {
            Vec::new()
        },
        ..Default::default()
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score: hit.score,
        max_score: def.max_score,
        details,
        insights: Some(insights),
    }
}

/// Banded type-token ratio over alphabetic word tokens
pub fn vocabulary_richness(def: &MetricDef, ctx: &EvalContext<'_>) -> MetricScore {
    let Some(bands) = &def.bands else {
        return missing_bands(def);
    };

    let tokens = alphabetic_tokens(&ctx.lower);
    let unique: BTreeSet<&str> = tokens.iter().copied().collect();
    let ttr = if tokens.is_empty() {
        0.0
    } else {
        unique.len() as f64 / tokens.len() as f64
    };

    let hit = bands.lookup(ttr);
    let details = if hit.miss {
        hit.level.to_string()
    } else {
        format!(
            "{}: TTR = {:.2} ({}/{})",
            hit.level,
            ttr,
            unique.len(),
            tokens.len()
        )
    };

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Type-Token Ratio analysis shows {:.3} vocabulary diversity with {} unique words from {} total words",
            ttr,
            unique.len(),
            tokens.len()
        )),
        recommendations: if ttr < 0.5 {
            vec![
                "Use a wider variety of vocabulary".into(),
                "Avoid repetitive words and phrases".into(),
                "Introduce synonyms for commonly used terms".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if ttr >= 0.7 {
            vec![
                "Excellent vocabulary diversity".into(),
                "Rich lexical variety".into(),
            ]
        } else {
            Vec::new()
        },
        ..Default::default()
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score: hit.score,
        max_score: def.max_score,
        details,
        insights: Some(insights),
    }
}

fn missing_bands(def: &MetricDef) -> MetricScore {
    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score: 0.0,
        max_score: def.max_score,
        details: "No band table configured".to_string(),
        insights: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::{CriterionId, Rubric};

    fn metric_def(rubric: &Rubric, criterion: CriterionId, index: usize) -> MetricDef {
        rubric.criterion(criterion).unwrap().metrics[index].clone()
    }

    #[test]
    fn detectors_count_each_flaw() {
        let words = crate::rubric::WordLists::default();

        let clean = "Hello there. I am fine.";
        assert_eq!(count_grammar_errors(clean, &clean.to_lowercase(), &words), 0);

        let doubled_ws = "Hello  there. I am fine.";
        assert_eq!(
            count_grammar_errors(doubled_ws, &doubled_ws.to_lowercase(), &words),
            1
        );

        let doubled_punct = "Hello there,, I am fine.";
        assert_eq!(
            count_grammar_errors(doubled_punct, &doubled_punct.to_lowercase(), &words),
            1
        );

        let lowercase_start = "Hello there. i am fine.";
        assert_eq!(
            count_grammar_errors(lowercase_start, &lowercase_start.to_lowercase(), &words),
            1
        );

        let dropped = "Hello there. I dont mind.";
        assert_eq!(
            count_grammar_errors(dropped, &dropped.to_lowercase(), &words),
            1
        );

        // A real apostrophe is not a flaw
        let contraction = "Hello there. I don't mind.";
        assert_eq!(
            count_grammar_errors(contraction, &contraction.to_lowercase(), &words),
            0
        );
    }

    #[test]
    fn grammar_density_maps_to_bands() {
        let rubric = Rubric::builtin();
        let def = metric_def(&rubric, CriterionId::LanguageGrammar, 0);

        // 0 errors in 8 words: g = 1.0, excellent
        let ctx = EvalContext::new("Hello there. I am doing quite well today.", 10.0, &rubric.words);
        let m = grammar_errors(&def, &ctx, &rubric.words);
        assert_eq!(m.score, 10.0);
        assert!(m.details.starts_with("excellent:"));
    }

    #[test]
    fn ttr_bands_and_details() {
        let rubric = Rubric::builtin();
        let def = metric_def(&rubric, CriterionId::LanguageGrammar, 1);

        // All unique words: TTR 1.0, excellent
        let ctx = EvalContext::new("one brave fox jumped over another fence", 10.0, &rubric.words);
        let m = vocabulary_richness(&def, &ctx);
        assert_eq!(m.score, 10.0);

        // Heavy repetition: 2 unique / 8 tokens = 0.25, below every band,
        // so the declared fallback applies instead of zero
        let ctx = EvalContext::new("go go go go stop stop stop stop", 10.0, &rubric.words);
        let m = vocabulary_richness(&def, &ctx);
        assert_eq!(m.score, 2.0);
        assert_eq!(m.details, "Poor vocabulary diversity");
    }

    #[test]
    fn digit_led_tokens_are_excluded() {
        let rubric = Rubric::builtin();
        let def = metric_def(&rubric, CriterionId::LanguageGrammar, 1);
        // "8th" and "13" contribute no tokens
        let ctx = EvalContext::new("class 8th and age 13 now", 10.0, &rubric.words);
        let m = vocabulary_richness(&def, &ctx);
        assert!(m.details.contains("(4/4)"));
    }
}
