//! Engagement evaluator: banded sentiment positivity

use crate::rubric::MetricDef;
use crate::types::{MetricInsights, MetricScore};

use super::EvalContext;

/// Banded positivity ratio from the lexicon sentiment scorer
pub fn sentiment_positivity(def: &MetricDef, ctx: &EvalContext<'_>) -> MetricScore {
    let Some(bands) = &def.bands else {
        return MetricScore {
            id: def.id,
            name: def.name.clone(),
            score: 0.0,
            max_score: def.max_score,
            details: "No band table configured".to_string(),
            insights: None,
        };
    };

    let positivity = ctx.sentiment.positivity();
    let hit = bands.lookup(positivity);
    let details = if hit.miss {
        hit.level.to_string()
    } else {
        format!(
            "{}: positivity score {:.2}, positive words: {}, negative: {}",
            hit.level, positivity, ctx.sentiment.positive, ctx.sentiment.negative
        )
    };

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Sentiment analysis shows {:.2} positivity with {} positive and {} negative words",
            positivity, ctx.sentiment.positive, ctx.sentiment.negative
        )),
        recommendations: if positivity < 0.6 {
            vec![
                "Add more positive language and enthusiasm".into(),
                "Include expressions of excitement or gratitude".into(),
                "Focus on strengths and achievements".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if positivity >= 0.8 {
            vec![
                "Excellent positive sentiment".into(),
                "Engaging and enthusiastic tone".into(),
                "Good emotional connection".into(),
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
