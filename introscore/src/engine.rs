//! Scoring engine
//!
//! [`ScoringEngine`] owns the active rubrics and the optional semantic
//! and enrichment capabilities. `score` runs the deterministic local
//! pipeline synchronously; `score_advanced` additionally fans out the
//! coherence and enrichment branches concurrently, each behind its own
//! timeout, and degrades per branch instead of failing the request.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::aggregate;
use crate::enrichment::{self, EnrichmentAnalyzer};
use crate::error::RubricError;
use crate::metrics::{self, EvalContext};
use crate::recommend;
use crate::rubric::Rubric;
use crate::semantic::coherence::{self, CoherenceAnalysis};
use crate::semantic::summary;
use crate::semantic::EmbedderHandle;
use crate::types::{
    CriterionScore, EnrichmentSummary, ScoreInsights, ScoreResult, ScoringMethod,
};

/// The basic and advanced rubrics an engine scores against
#[derive(Clone)]
pub struct RubricSet {
    /// Rubric for the local-heuristics path
    pub basic: Rubric,
    /// Rubric for the advanced path (tone criterion, coherence blend)
    pub advanced: Rubric,
}

impl RubricSet {
    /// The built-in rubric pair
    pub fn builtin() -> Self {
        Self {
            basic: Rubric::builtin(),
            advanced: Rubric::builtin_advanced(),
        }
    }

    fn validate(&self) -> Result<(), RubricError> {
        self.basic.validate()?;
        self.advanced.validate()
    }
}

/// Transcript scoring engine
pub struct ScoringEngine {
    rubrics: RwLock<Arc<RubricSet>>,
    embedder: Option<EmbedderHandle>,
    enrichment: Option<Arc<dyn EnrichmentAnalyzer>>,
    branch_timeout: Duration,
}

impl ScoringEngine {
    /// Engine with the built-in rubrics and no optional capabilities
    pub fn new() -> Result<Self, RubricError> {
        Self::with_rubrics(RubricSet::builtin())
    }

    /// Engine with caller-supplied rubrics, validated up front
    pub fn with_rubrics(rubrics: RubricSet) -> Result<Self, RubricError> {
        rubrics.validate()?;
        Ok(Self {
            rubrics: RwLock::new(Arc::new(rubrics)),
            embedder: None,
            enrichment: None,
            branch_timeout: Duration::from_secs(15),
        })
    }

    /// Attach a sentence embedder for the coherence branch
    pub fn with_embedder(mut self, embedder: EmbedderHandle) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Attach an enrichment analyzer (an [`EnrichmentClient`] in
    /// production)
    ///
    /// [`EnrichmentClient`]: crate::enrichment::EnrichmentClient
    pub fn with_enrichment(mut self, analyzer: impl EnrichmentAnalyzer + 'static) -> Self {
        self.enrichment = Some(Arc::new(analyzer));
        self
    }

    /// Override the per-branch timeout used by the advanced path
    pub fn with_branch_timeout(mut self, timeout: Duration) -> Self {
        self.branch_timeout = timeout;
        self
    }

    /// Swap in new rubrics
    ///
    /// The replacement is validated before it becomes visible. Requests
    /// already in flight keep scoring against the snapshot they took.
    pub fn reload_rubrics(&self, rubrics: RubricSet) -> Result<(), RubricError> {
        rubrics.validate()?;
        let mut guard = self
            .rubrics
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(rubrics);
        info!("rubrics reloaded");
        Ok(())
    }

    fn rubric_snapshot(&self) -> Arc<RubricSet> {
        self.rubrics
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Score a transcript with local heuristics only
    ///
    /// Deterministic: the same transcript and duration always produce
    /// the same result. An empty or whitespace-only transcript scores
    /// zero with an explanatory feedback line rather than erroring.
    pub fn score(&self, transcript: &str, duration_seconds: f64) -> ScoreResult {
        let rubrics = self.rubric_snapshot();

        if transcript.trim().is_empty() {
            return empty_result(duration_seconds);
        }

        let ctx = EvalContext::new(transcript, duration_seconds, &rubrics.basic.words);
        let criteria = evaluate_rubric(&rubrics.basic, &ctx, None, false);
        let overall = aggregate::overall_score(&criteria);
        let insights = recommend::synthesize(overall, ctx.speech_rate, &criteria, None, None);
        debug!(overall, word_count = ctx.word_count, "scored transcript");

        ScoreResult {
            overall_score: overall,
            max_overall_score: 100.0,
            word_count: ctx.word_count,
            duration: duration_seconds,
            speech_rate: ctx.speech_rate,
            grade: recommend::grade(overall).to_string(),
            scoring_method: ScoringMethod::LocalHeuristics,
            criteria,
            insights: Some(insights),
            conciseness_analysis: None,
            enrichment: None,
        }
    }

    /// Score a transcript with the advanced rubric and optional branches
    ///
    /// The coherence and enrichment branches run concurrently, each
    /// bounded by the engine's branch timeout. A branch that times out
    /// or fails contributes its neutral fallback; the local evaluators
    /// always run.
    pub async fn score_advanced(&self, transcript: &str, duration_seconds: f64) -> ScoreResult {
        let rubrics = self.rubric_snapshot();

        if transcript.trim().is_empty() {
            return empty_result(duration_seconds);
        }

        let (coherence, enrichment) = tokio::join!(
            self.coherence_branch(transcript),
            self.enrichment_branch(transcript),
        );

        let words = &rubrics.advanced.words;
        let ctx = EvalContext::new(transcript, duration_seconds, words);
        let criteria = evaluate_rubric(&rubrics.advanced, &ctx, Some(&coherence), true);
        let local_overall = aggregate::overall_score(&criteria);

        // Enrichment signals that actually answered pull the overall
        // toward their weighted composite, scaled by confidence: an
        // even split at full confidence, pure local at zero.
        let (overall, scoring_method) = match &enrichment {
            Some(summary) if summary.confidence > 0.0 => {
                let share = summary.confidence / 2.0;
                let blended =
                    (local_overall * (1.0 - share) + summary.composite_score() * share).round();
                (blended, ScoringMethod::Hybrid)
            }
            _ => (local_overall, ScoringMethod::LocalHeuristics),
        };

        let extract = summary::extractive_summary(transcript, &words.summary_keywords);
        let conciseness =
            summary::core_message_density(transcript, &extract, &words.core_message_keywords);
        let insights = recommend::synthesize(
            overall,
            ctx.speech_rate,
            &criteria,
            Some(&conciseness),
            enrichment.as_ref(),
        );
        debug!(
            overall,
            local_overall,
            ?scoring_method,
            coherence = coherence.score,
            "scored transcript (advanced)"
        );

        ScoreResult {
            overall_score: overall,
            max_overall_score: 100.0,
            word_count: ctx.word_count,
            duration: duration_seconds,
            speech_rate: ctx.speech_rate,
            grade: recommend::grade(overall).to_string(),
            scoring_method,
            criteria,
            insights: Some(insights),
            conciseness_analysis: Some(conciseness),
            enrichment,
        }
    }

    async fn coherence_branch(&self, transcript: &str) -> CoherenceAnalysis {
        let Some(embedder) = &self.embedder else {
            return CoherenceAnalysis::neutral("embedder not configured");
        };
        match tokio::time::timeout(self.branch_timeout, coherence::analyze(transcript, embedder))
            .await
        {
            Ok(analysis) => analysis,
            Err(_) => {
                warn!(timeout = ?self.branch_timeout, "coherence branch timed out");
                CoherenceAnalysis::neutral("coherence analysis timed out")
            }
        }
    }

    async fn enrichment_branch(&self, transcript: &str) -> Option<EnrichmentSummary> {
        let client = self.enrichment.as_ref()?;
        match tokio::time::timeout(self.branch_timeout, client.analyze(transcript)).await {
            Ok(summary) => Some(summary),
            Err(_) => {
                warn!(timeout = ?self.branch_timeout, "enrichment branch timed out");
                Some(EnrichmentSummary::all_fallback(
                    "enrichment timed out",
                    enrichment::local_completeness(transcript),
                    enrichment::local_structure(transcript),
                    enrichment::local_engagement(transcript),
                ))
            }
        }
    }
}

fn evaluate_rubric(
    rubric: &Rubric,
    ctx: &EvalContext<'_>,
    coherence: Option<&CoherenceAnalysis>,
    keep_insights: bool,
) -> Vec<CriterionScore> {
    rubric
        .criteria
        .iter()
        .map(|criterion| {
            let metric_scores = criterion
                .metrics
                .iter()
                .map(|def| {
                    let mut metric = metrics::evaluate(def, ctx, &rubric.words, coherence);
                    if !keep_insights {
                        metric.insights = None;
                    }
                    metric
                })
                .collect();
            aggregate::criterion_score(criterion, metric_scores)
        })
        .collect()
}

fn empty_result(duration_seconds: f64) -> ScoreResult {
    let mut insights = ScoreInsights::default();
    insights
        .feedback
        .push("No transcript content to score".to_string());

    ScoreResult {
        overall_score: 0.0,
        max_overall_score: 100.0,
        word_count: 0,
        duration: duration_seconds,
        speech_rate: 0,
        grade: recommend::grade(0.0).to_string(),
        scoring_method: ScoringMethod::LocalHeuristics,
        criteria: Vec::new(),
        insights: Some(insights),
        conciseness_analysis: None,
        enrichment: None,
    }
}
