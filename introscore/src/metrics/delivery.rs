//! Delivery evaluators: speech pacing and filler word rate

use tracing::debug;

use crate::rubric::{MetricDef, WordLists};
use crate::types::{MetricInsights, MetricScore};

use super::EvalContext;

/// Banded words-per-minute score
pub fn speech_rate(def: &MetricDef, ctx: &EvalContext<'_>) -> MetricScore {
    let rate = ctx.speech_rate;
    let Some(bands) = &def.bands else {
        return missing_bands(def);
    };

    let hit = bands.lookup(rate as f64);
    let details = if hit.miss {
        hit.level.to_string()
    } else {
        format!("{}: {} WPM", hit.level, rate)
    };

    let recommendations = if rate > 140 {
        vec![
            "Consider speaking slightly slower for better clarity".into(),
            "Add brief pauses between key points".into(),
        ]
    } else if rate < 111 {
        vec![
            "Consider speaking slightly faster to maintain engagement".into(),
            "Practice with a metronome to improve pacing".into(),
        ]
    } else {
        Vec::new()
    };

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Speech rate analysis indicates {} speaking pace at {} words per minute",
            hit.level, rate
        )),
        recommendations,
        detected_strengths: if (111..=140).contains(&rate) {
            vec!["Optimal speech rate for engagement and clarity".into()]
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

/// Banded filler word rate: fillers matched as substrings of
/// whitespace-split words, rate as a percentage of all words
pub fn filler_word_rate(def: &MetricDef, ctx: &EvalContext<'_>, words: &WordLists) -> MetricScore {
    let Some(bands) = &def.bands else {
        return missing_bands(def);
    };

    let split: Vec<&str> = ctx.lower.split_whitespace().collect();
    let mut filler_count = 0usize;
    for filler in &words.filler_words {
        filler_count += split.iter().filter(|w| w.contains(filler.as_str())).count();
    }

    let rate = if split.is_empty() {
        0.0
    } else {
        filler_count as f64 / split.len() as f64 * 100.0
    };
    debug!(filler_count, rate, "filler word analysis");

    let hit = bands.lookup(rate);
    let details = if hit.miss {
        hit.level.to_string()
    } else {
        format!("{}: {} filler words, {:.1}% rate", hit.level, filler_count, rate)
    };

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Clarity analysis detected {} filler words ({:.1}% filler rate) out of {} total words",
            filler_count,
            rate,
            split.len()
        )),
        recommendations: if rate > 6.0 {
            vec![
                "Practice speaking without filler words".into(),
                "Record yourself and count filler usage".into(),
                "Use brief pauses instead of filler words".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if rate <= 3.0 {
            vec![
                "Excellent clarity with minimal filler words".into(),
                "Confident and articulate speech".into(),
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
