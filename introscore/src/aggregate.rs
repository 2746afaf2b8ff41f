//! Score aggregation
//!
//! Criterion scores are plain sums of their metric scores. The overall
//! score normalizes each criterion to its own maximum before weighting,
//! so a criterion's influence is exactly its weight regardless of how
//! many points its metrics carry:
//!
//! `overall = round(sum(weight_c * score_c / max_c) * 100)`

use tracing::debug;

use crate::rubric::{CriterionDef, CriterionId};
use crate::types::{CriterionScore, MetricScore};

/// Assemble a criterion score from its evaluated metrics
pub fn criterion_score(def: &CriterionDef, metrics: Vec<MetricScore>) -> CriterionScore {
    let score = metrics.iter().map(|m| m.score).sum();
    CriterionScore {
        id: def.id,
        name: def.name.clone(),
        score,
        max_score: def.max_score,
        weight: def.weight,
        metrics,
    }
}

/// Weighted, normalized overall score out of 100
pub fn overall_score(criteria: &[CriterionScore]) -> f64 {
    let weighted: f64 = criteria.iter().map(|c| c.weight * c.ratio()).sum();
    let overall = (weighted * 100.0).round();
    debug!(overall, "aggregated overall score");
    overall
}

/// Find a scored criterion by its identifier
pub fn find_criterion(criteria: &[CriterionScore], id: CriterionId) -> Option<&CriterionScore> {
    criteria.iter().find(|c| c.id == id)
}
