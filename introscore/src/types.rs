//! Core result types for introscore
//!
//! Everything in a `ScoreResult` is request-scoped and serializable: the
//! engine builds it once per transcript and never mutates it afterwards,
//! so results can cross an HTTP boundary or be cached as-is.

use serde::{Deserialize, Serialize};

use crate::rubric::{CriterionId, MetricId};

/// Per-metric model-derived commentary
///
/// Populated on the advanced path only; the basic path keeps metrics lean.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricInsights {
    /// One-line description of what the analysis observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_analysis: Option<String>,
    /// Concrete suggestions for the speaker
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// Problems the analysis detected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_issues: Vec<String>,
    /// Strengths the analysis detected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_strengths: Vec<String>,
}

/// One scored metric within a criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricScore {
    /// Stable metric identifier
    pub id: MetricId,
    /// Display name
    pub name: String,
    /// Awarded points, always in `[0, max_score]`
    pub score: f64,
    /// Maximum awardable points
    pub max_score: f64,
    /// Human-readable explanation of how the score was reached
    pub details: String,
    /// Model-derived commentary (advanced path only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<MetricInsights>,
}

/// One scored rubric criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    /// Stable criterion identifier
    pub id: CriterionId,
    /// Display name
    pub name: String,
    /// Sum of the metric scores
    pub score: f64,
    /// Sum of the metric maxima
    pub max_score: f64,
    /// Weight used for the overall score (all weights sum to 1.0)
    pub weight: f64,
    /// The metrics that make up this criterion, in rubric order
    pub metrics: Vec<MetricScore>,
}

impl CriterionScore {
    /// Fraction of the maximum this criterion achieved (0.0 when max is 0)
    pub fn ratio(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score
        } else {
            0.0
        }
    }
}

/// Which pipeline produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Deterministic local evaluators only
    LocalHeuristics,
    /// Local evaluators blended with remote enrichment signals
    Hybrid,
}

/// Outcome of an unreliable branch (semantic analysis, remote calls)
///
/// A failing branch never surfaces as an error: it yields its documented
/// fallback value, and the reason travels with the result so downstream
/// consumers can see exactly which signals degraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BranchOutcome<T> {
    /// Branch completed normally
    Ok { value: T },
    /// Branch degraded to its fallback value
    Fallback { value: T, reason: String },
}

impl<T> BranchOutcome<T> {
    /// Successful outcome
    pub fn ok(value: T) -> Self {
        BranchOutcome::Ok { value }
    }

    /// Degraded outcome with the reason it fell back
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        BranchOutcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    /// The carried value, fallback or not
    pub fn value(&self) -> &T {
        match self {
            BranchOutcome::Ok { value } => value,
            BranchOutcome::Fallback { value, .. } => value,
        }
    }

    /// True when the branch degraded
    pub fn is_fallback(&self) -> bool {
        matches!(self, BranchOutcome::Fallback { .. })
    }

    /// Fallback reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            BranchOutcome::Ok { .. } => None,
            BranchOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Tiered feedback, kept in separate channels (never merged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreInsights {
    /// Rubric shortfalls: metrics below 70% of their max
    pub rule_based: Vec<String>,
    /// Delivery commentary: pacing, missing core-message elements
    pub semantic: Vec<String>,
    /// Concatenated per-metric model recommendations
    pub model_based: Vec<String>,
    /// Criteria at or above 80% of their max
    pub strengths: Vec<String>,
    /// Criteria below 70% of their max
    pub improvements: Vec<String>,
    /// Overall summary lines (score, grade, tier sentence)
    pub feedback: Vec<String>,
}

/// Extractive summary analysis of how dense the core message is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcisenessAnalysis {
    /// Transcript length in characters
    pub original_length: usize,
    /// Extractive summary (top sentences, original order)
    pub summary: String,
    /// Density score out of 10: `max(0, 10 - 2 * missing)`
    pub core_message_density: f64,
    /// Required core-message keywords absent from the summary
    pub missing_keywords: Vec<String>,
    /// `summary.len() / original.len()`
    pub compression_ratio: f64,
    /// Fraction of required keywords the summary covers
    pub keyword_coverage: f64,
}

/// Aggregated remote enrichment signals, all normalized to 0.0-1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    /// Positive-sentiment score from the remote sentiment model
    pub sentiment: BranchOutcome<f64>,
    /// Introduction quality classification mapped to a fixed scale
    pub quality: BranchOutcome<f64>,
    /// Clarity estimate from summarization compression
    pub clarity: BranchOutcome<f64>,
    /// Professionalism rating extracted from generated text
    pub professionalism: BranchOutcome<f64>,
    /// Locally derived completeness estimate
    pub completeness: f64,
    /// Locally derived structure estimate
    pub structure: f64,
    /// Locally derived engaging-language estimate
    pub engagement: f64,
    /// `successful_calls / total_calls`
    pub confidence: f64,
}

impl EnrichmentSummary {
    /// Summary where every remote call degraded for the same reason
    pub fn all_fallback(reason: &str, completeness: f64, structure: f64, engagement: f64) -> Self {
        Self {
            sentiment: BranchOutcome::fallback(0.5, reason),
            quality: BranchOutcome::fallback(0.5, reason),
            clarity: BranchOutcome::fallback(0.5, reason),
            professionalism: BranchOutcome::fallback(0.5, reason),
            completeness,
            structure,
            engagement,
            confidence: 0.0,
        }
    }

    /// Weighted composite of the enrichment signals, out of 100
    ///
    /// Completeness .30, clarity .25, professionalism .20, engagement
    /// .15, structure .10. The sentiment and quality calls carry no
    /// composite weight; they contribute through `confidence` and the
    /// reported summary only.
    pub fn composite_score(&self) -> f64 {
        (self.clarity.value() * 0.25
            + self.completeness * 0.30
            + self.professionalism.value() * 0.20
            + self.engagement * 0.15
            + self.structure * 0.10)
            * 100.0
    }
}

/// Complete scoring result for one transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted overall score, rounded, always in `[0, 100]`
    pub overall_score: f64,
    /// Always 100
    pub max_overall_score: f64,
    /// Whitespace-separated word count
    pub word_count: usize,
    /// Spoken duration in seconds, echoed from the request
    pub duration: f64,
    /// Words per minute, 0 when duration is not positive
    pub speech_rate: u32,
    /// Letter grade for the overall score
    pub grade: String,
    /// Which pipeline produced this result
    pub scoring_method: ScoringMethod,
    /// Scored criteria in rubric order
    pub criteria: Vec<CriterionScore>,
    /// Tiered feedback channels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<ScoreInsights>,
    /// Core-message density analysis (advanced path only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conciseness_analysis: Option<ConcisenessAnalysis>,
    /// Remote enrichment signals (advanced path with a client configured)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_outcome_accessors() {
        let ok: BranchOutcome<f64> = BranchOutcome::ok(0.9);
        assert!(!ok.is_fallback());
        assert_eq!(*ok.value(), 0.9);
        assert_eq!(ok.reason(), None);

        let fb: BranchOutcome<f64> = BranchOutcome::fallback(0.5, "timed out");
        assert!(fb.is_fallback());
        assert_eq!(*fb.value(), 0.5);
        assert_eq!(fb.reason(), Some("timed out"));
    }

    #[test]
    fn branch_outcome_serde_tags_status() {
        let fb: BranchOutcome<f64> = BranchOutcome::fallback(0.5, "network error");
        let json = serde_json::to_value(&fb).unwrap();
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["value"], 0.5);
        assert_eq!(json["reason"], "network error");

        let back: BranchOutcome<f64> = serde_json::from_value(json).unwrap();
        assert!(back.is_fallback());
    }

    #[test]
    fn composite_weights_the_five_signals() {
        let summary = EnrichmentSummary {
            sentiment: BranchOutcome::ok(0.95),
            quality: BranchOutcome::ok(0.9),
            clarity: BranchOutcome::ok(0.8),
            professionalism: BranchOutcome::ok(0.8),
            completeness: 1.0,
            structure: 1.0,
            engagement: 1.0,
            confidence: 1.0,
        };
        // .25*.8 + .30*1 + .20*.8 + .15*1 + .10*1 = .91
        assert!((summary.composite_score() - 91.0).abs() < 1e-9);

        // Degraded remote calls contribute their 0.5 fallback values
        let degraded = EnrichmentSummary::all_fallback("network error", 0.6, 0.5, 0.0);
        // .25*.5 + .30*.6 + .20*.5 + .15*0 + .10*.5 = .455
        assert!((degraded.composite_score() - 45.5).abs() < 1e-9);
        assert_eq!(degraded.confidence, 0.0);
    }

    #[test]
    fn criterion_ratio_guards_zero_max() {
        let c = CriterionScore {
            id: CriterionId::Clarity,
            name: "Clarity".into(),
            score: 0.0,
            max_score: 0.0,
            weight: 0.15,
            metrics: Vec::new(),
        };
        assert_eq!(c.ratio(), 0.0);
    }
}
