//! Tone & Register evaluators (advanced rubric only)
//!
//! Politeness and professionalism use direct marker-count formulas
//! rather than band tables, both clamped to [0, 10].

use crate::rubric::{MetricDef, WordLists};
use crate::types::{MetricInsights, MetricScore};

use super::EvalContext;

fn marker_count(lower: &str, markers: &[String]) -> usize {
    markers.iter().filter(|m| lower.contains(m.as_str())).count()
}

/// `min(10, polite_markers * 2 + 2 if any positive words)`
pub fn politeness(def: &MetricDef, ctx: &EvalContext<'_>, words: &WordLists) -> MetricScore {
    let polite = marker_count(&ctx.lower, &words.polite_markers);
    let positivity_bonus = if ctx.sentiment.positive > 0 { 2.0 } else { 0.0 };
    let score = (polite as f64 * 2.0 + positivity_bonus).clamp(0.0, 10.0);

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Detected {} politeness indicators and {} positive words",
            polite, ctx.sentiment.positive
        )),
        recommendations: if score < 6.0 {
            vec![
                "Add polite greetings like 'Good morning' or 'Hello everyone'".into(),
                "Include expressions of gratitude like 'Thank you for listening'".into(),
                "Use formal closing statements".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if score >= 8.0 {
            vec![
                "Good use of polite expressions".into(),
                "Positive tone detected".into(),
                "Professional register maintained".into(),
            ]
        } else {
            Vec::new()
        },
        detected_issues: if score < 6.0 {
            vec![
                "Insufficient politeness indicators".into(),
                "Could benefit from more formal language".into(),
            ]
        } else {
            Vec::new()
        },
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score,
        max_score: def.max_score,
        details: format!("{}/10 politeness detected", score),
        insights: Some(insights),
    }
}

/// `max(2, 10 - informal_markers * 2 + 2 if any professional markers)`
pub fn professionalism(def: &MetricDef, ctx: &EvalContext<'_>, words: &WordLists) -> MetricScore {
    let professional = marker_count(&ctx.lower, &words.professional_markers);
    let informal = marker_count(&ctx.lower, &words.informal_markers);
    let bonus = if professional > 0 { 2.0 } else { 0.0 };
    let score = (10.0 - informal as f64 * 2.0 + bonus).max(2.0).clamp(0.0, 10.0);

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Detected {} professional indicators and {} informal expressions",
            professional, informal
        )),
        recommendations: if score < 6.0 {
            vec![
                "Replace informal expressions with professional alternatives".into(),
                "Use industry-appropriate terminology".into(),
                "Maintain consistent formal tone".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if score >= 8.0 {
            vec![
                "Professional language use".into(),
                "Appropriate formality level".into(),
                "Consistent professional tone".into(),
            ]
        } else {
            Vec::new()
        },
        detected_issues: if score < 6.0 {
            vec![
                "Too informal expressions detected".into(),
                "Could use more professional language".into(),
            ]
        } else {
            Vec::new()
        },
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score,
        max_score: def.max_score,
        details: format!("{}/10 professional level", score),
        insights: Some(insights),
    }
}
