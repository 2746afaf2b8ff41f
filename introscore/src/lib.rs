//! introscore - Self-Introduction Scoring Engine
//!
//! Scores spoken self-introduction transcripts against a weighted
//! rubric. The basic path is fully deterministic local heuristics; the
//! advanced path adds embedding-based coherence analysis, an extractive
//! summary with core-message density, and optional remote enrichment
//! signals, every unreliable branch degrading to documented fallbacks
//! instead of failing the request.
//!
//! ```no_run
//! use introscore::ScoringEngine;
//!
//! # fn main() -> Result<(), introscore::RubricError> {
//! let engine = ScoringEngine::new()?;
//! let result = engine.score("Hello everyone, my name is Asha...", 45.0);
//! println!("{}/100 ({})", result.overall_score, result.grade);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod recommend;
pub mod rubric;
pub mod semantic;
pub mod sentiment;
pub mod text;
pub mod types;

pub use engine::{RubricSet, ScoringEngine};
pub use enrichment::{EnrichmentAnalyzer, EnrichmentClient, EnrichmentConfig};
pub use error::{EnrichmentError, RubricError, SemanticError};
pub use rubric::{CriterionId, MetricId, Rubric};
pub use semantic::{EmbedderHandle, SentenceEmbedder};
pub use types::{
    BranchOutcome, ConcisenessAnalysis, CriterionScore, EnrichmentSummary, MetricScore,
    ScoreInsights, ScoreResult, ScoringMethod,
};
