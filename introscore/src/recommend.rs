//! Recommendation synthesis
//!
//! Turns scored criteria plus the semantic analysis into the tiered
//! feedback channels of [`ScoreInsights`], and maps overall scores to
//! letter grades. Channels stay separate so a consumer can render
//! rule-based shortfalls, delivery commentary, and model suggestions
//! independently.

use crate::types::{ConcisenessAnalysis, CriterionScore, EnrichmentSummary, ScoreInsights};

/// Fraction of max below which a metric or criterion needs improvement
const IMPROVEMENT_THRESHOLD: f64 = 0.7;
/// Fraction of max at or above which a criterion counts as a strength
const STRENGTH_THRESHOLD: f64 = 0.8;

/// Letter grade for an overall score out of 100
pub fn grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A+"
    } else if score >= 85.0 {
        "A"
    } else if score >= 80.0 {
        "A-"
    } else if score >= 75.0 {
        "B+"
    } else if score >= 70.0 {
        "B"
    } else if score >= 65.0 {
        "B-"
    } else if score >= 60.0 {
        "C+"
    } else if score >= 55.0 {
        "C"
    } else if score >= 50.0 {
        "C-"
    } else if score >= 45.0 {
        "D+"
    } else if score >= 40.0 {
        "D"
    } else if score >= 35.0 {
        "D-"
    } else {
        "F"
    }
}

/// Build the tiered feedback channels for a scored transcript
///
/// `conciseness`, `enrichment`, and the per-metric insights only exist
/// on the advanced path; the basic path passes `None` and gets empty
/// semantic and model-based channels apart from the speech-rate
/// commentary. Enrichment signals add per-signal strengths and
/// improvements alongside the criterion-derived ones.
pub fn synthesize(
    overall: f64,
    speech_rate: u32,
    criteria: &[CriterionScore],
    conciseness: Option<&ConcisenessAnalysis>,
    enrichment: Option<&EnrichmentSummary>,
) -> ScoreInsights {
    let mut insights = ScoreInsights::default();

    for criterion in criteria {
        for metric in &criterion.metrics {
            if metric.max_score > 0.0
                && metric.score / metric.max_score < IMPROVEMENT_THRESHOLD
            {
                insights.rule_based.push(format!(
                    "{}: Only scored {}/{}",
                    metric.name, metric.score, metric.max_score
                ));
            }
            if let Some(metric_insights) = &metric.insights {
                insights
                    .model_based
                    .extend(metric_insights.recommendations.iter().cloned());
            }
        }

        let ratio = criterion.ratio();
        if ratio >= STRENGTH_THRESHOLD {
            insights.strengths.push(format!("{} is strong", criterion.name));
        } else if ratio < IMPROVEMENT_THRESHOLD {
            insights
                .improvements
                .push(format!("Improve {}", criterion.name.to_lowercase()));
        }
    }

    if speech_rate > 160 {
        insights
            .semantic
            .push("Speech rate too fast - aim for 111-140 WPM".to_string());
    } else if speech_rate > 0 && speech_rate < 80 {
        insights
            .semantic
            .push("Speech rate too slow - aim for 111-140 WPM".to_string());
    }
    if let Some(analysis) = conciseness {
        if !analysis.missing_keywords.is_empty() {
            insights.semantic.push(format!(
                "Core message missing key elements: {}",
                analysis.missing_keywords.join(", ")
            ));
        }
    }

    if let Some(summary) = enrichment {
        apply_enrichment_feedback(&mut insights, summary);
    }

    insights
        .feedback
        .push(format!("Your introduction scored {}/100 ({})", overall, grade(overall)));
    insights.feedback.push(
        if overall >= 85.0 {
            "Excellent self-introduction! Very well done."
        } else if overall >= 70.0 {
            "Good introduction with room for improvement."
        } else if overall >= 55.0 {
            "Fair introduction that needs some enhancement."
        } else {
            "Introduction needs significant improvement."
        }
        .to_string(),
    );

    insights
}

/// Per-signal strengths and improvements from the enrichment summary
fn apply_enrichment_feedback(insights: &mut ScoreInsights, summary: &EnrichmentSummary) {
    let signals: [(f64, f64, &str, &str); 5] = [
        (
            *summary.clarity.value(),
            0.8,
            "Clear and well-structured communication",
            "Work on making your introduction clearer and more organized",
        ),
        (
            summary.completeness,
            0.8,
            "Comprehensive introduction covering all key aspects",
            "Include more essential information about yourself",
        ),
        (
            *summary.professionalism.value(),
            0.8,
            "Professional tone and appropriate language",
            "Use more professional language and tone",
        ),
        (
            summary.engagement,
            0.7,
            "Engaging and positive presentation",
            "Add more enthusiasm and engaging language",
        ),
        (
            summary.structure,
            0.8,
            "Well-structured introduction with proper opening and closing",
            "Improve the structure with better opening and closing",
        ),
    ];

    for (value, threshold, strength, improvement) in signals {
        if value >= threshold {
            insights.strengths.push(strength.to_string());
        } else {
            insights.improvements.push(improvement.to_string());
        }
    }
}
