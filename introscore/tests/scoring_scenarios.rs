//! End-to-end scoring scenarios against the built-in rubrics

use std::sync::Arc;

use introscore::error::SemanticError;
use introscore::rubric::Rubric;
use introscore::{
    BranchOutcome, CriterionId, EmbedderHandle, EnrichmentAnalyzer, EnrichmentSummary, MetricId,
    RubricSet, ScoreResult, ScoringEngine, ScoringMethod, SentenceEmbedder,
};

/// Embedder returning the same unit vector for every sentence
struct ConstantEmbedder {
    vector: Vec<f32>,
}

#[async_trait::async_trait]
impl SentenceEmbedder for ConstantEmbedder {
    async fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, SemanticError> {
        Ok(vec![self.vector.clone(); sentences.len()])
    }
}

/// Analyzer returning a fixed enrichment summary
struct FixedAnalyzer {
    summary: EnrichmentSummary,
}

#[async_trait::async_trait]
impl EnrichmentAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _transcript: &str) -> EnrichmentSummary {
        self.summary.clone()
    }
}

/// A real student introduction, spoken in 52 seconds
const STUDENT_TRANSCRIPT: &str = "Hello everyone, myself Muskan, studying in class 8th B section from Christ Public School.\n\
I am 13 years old. I live with my family. There are 3 people in my family, me, my mother and my father.\n\
One special thing about my family is that they are very kind hearted to everyone and soft spoken. One thing I really enjoy is play, playing cricket and taking wickets.\n\
A fun fact about me is that I see in mirror and talk by myself. One thing people don't know about me is that I once stole a toy from one of my cousin.\n \
My favorite subject is science because it is very interesting. Through science I can explore the whole world and make the discoveries and improve the lives of others.\n\
Thank you for listening.";

fn metric(result: &ScoreResult, id: MetricId) -> &introscore::MetricScore {
    result
        .criteria
        .iter()
        .flat_map(|c| c.metrics.iter())
        .find(|m| m.id == id)
        .unwrap_or_else(|| panic!("metric {:?} missing", id))
}

fn criterion(result: &ScoreResult, id: CriterionId) -> &introscore::CriterionScore {
    result
        .criteria
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("criterion {:?} missing", id))
}

#[test]
fn student_case_study_scores_eighty() {
    let engine = ScoringEngine::new().unwrap();
    let result = engine.score(STUDENT_TRANSCRIPT, 52.0);

    assert_eq!(result.word_count, 133);
    assert_eq!(result.speech_rate, 153);

    // Per-metric outcomes
    let salutation = metric(&result, MetricId::Salutation);
    assert_eq!(salutation.score, 4.0);

    let keywords = metric(&result, MetricId::KeywordPresence);
    // must-have: class, school, family, play; good-to-have: from, fun fact, interesting
    assert_eq!(keywords.score, 22.0);
    assert!(keywords.details.contains("class"));
    assert!(keywords.details.contains("fun fact"));

    assert_eq!(metric(&result, MetricId::Flow).score, 5.0);

    let rate = metric(&result, MetricId::SpeechRate);
    assert_eq!(rate.score, 6.0);
    assert_eq!(rate.details, "Fast: 153 WPM");

    // One whitespace-run error over 133 words keeps grammar in the top band
    assert_eq!(metric(&result, MetricId::GrammarErrors).score, 10.0);

    // 84 unique of 131 alphabetic tokens: TTR 0.64
    let ttr = metric(&result, MetricId::VocabularyRichness);
    assert_eq!(ttr.score, 6.0);
    assert!(ttr.details.contains("0.64"));

    // "soft" contains "so": a single filler hit at 0.8%
    let filler = metric(&result, MetricId::FillerWordRate);
    assert_eq!(filler.score, 15.0);
    assert!(filler.details.contains("1 filler words"));

    // 8 positive vs 1 negative lexicon hits
    let sentiment = metric(&result, MetricId::SentimentPositivity);
    assert_eq!(sentiment.score, 12.0);
    assert!(sentiment.details.contains("0.89"));

    // Criterion sums
    assert_eq!(criterion(&result, CriterionId::ContentStructure).score, 31.0);
    assert_eq!(criterion(&result, CriterionId::SpeechRate).score, 6.0);
    assert_eq!(criterion(&result, CriterionId::LanguageGrammar).score, 16.0);
    assert_eq!(criterion(&result, CriterionId::Clarity).score, 15.0);
    assert_eq!(criterion(&result, CriterionId::Engagement).score, 12.0);

    assert_eq!(result.overall_score, 80.0);
    assert_eq!(result.grade, "A-");
    assert_eq!(result.scoring_method, ScoringMethod::LocalHeuristics);
}

#[test]
fn normalization_prevents_raw_weight_collapse() {
    let engine = ScoringEngine::new().unwrap();
    let result = engine.score(STUDENT_TRANSCRIPT, 52.0);

    // Weighting raw criterion points instead of normalized ratios would
    // have crushed this strong introduction into a failing score.
    let raw: f64 = result.criteria.iter().map(|c| c.weight * c.score).sum();
    assert_eq!(raw.round(), 20.0);
    assert_eq!(result.overall_score, 80.0);
}

#[test]
fn empty_transcript_yields_zeroed_result() {
    let engine = ScoringEngine::new().unwrap();
    for transcript in ["", "   ", "\n\t "] {
        let result = engine.score(transcript, 30.0);
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.grade, "F");
        assert!(result.criteria.is_empty());
    }
}

#[test]
fn nonpositive_duration_gives_zero_rate_not_error() {
    let engine = ScoringEngine::new().unwrap();
    for duration in [0.0, -5.0] {
        let result = engine.score("Hello everyone, I am here", duration);
        assert_eq!(result.speech_rate, 0);
        // Zero WPM falls outside every band: table fallback, not zero
        assert_eq!(metric(&result, MetricId::SpeechRate).score, 2.0);
    }
}

#[test]
fn scoring_is_case_insensitive() {
    let engine = ScoringEngine::new().unwrap();
    let lower = engine.score(STUDENT_TRANSCRIPT, 52.0);
    let upper = engine.score(&STUDENT_TRANSCRIPT.to_uppercase(), 52.0);

    // Uppercasing changes sentence-capitalization grammar checks but no
    // keyword, salutation, or flow outcome
    assert_eq!(
        metric(&lower, MetricId::KeywordPresence).score,
        metric(&upper, MetricId::KeywordPresence).score
    );
    assert_eq!(
        metric(&lower, MetricId::Salutation).score,
        metric(&upper, MetricId::Salutation).score
    );
    assert_eq!(
        metric(&lower, MetricId::Flow).score,
        metric(&upper, MetricId::Flow).score
    );
}

#[test]
fn flow_is_all_or_nothing() {
    let engine = ScoringEngine::new().unwrap();

    let complete = "Hello everyone. I am in class six. I love my family. Thank you.";
    let result = engine.score(complete, 15.0);
    assert_eq!(metric(&result, MetricId::Flow).score, 5.0);

    // Same text without a closing phrase loses the whole metric
    let no_closing = "Hello everyone. I am in class six. I love my family.";
    let result = engine.score(no_closing, 15.0);
    assert_eq!(metric(&result, MetricId::Flow).score, 0.0);
}

#[test]
fn gibberish_lands_in_fallback_bands() {
    let engine = ScoringEngine::new().unwrap();
    // 32 words, 3 distinct tokens: TTR under every band
    let gibberish = "blorp zug zug blorp wibble zug blorp wibble zug zug blorp wibble \
                     zug blorp wibble zug blorp zug wibble blorp zug wibble blorp zug \
                     wibble blorp zug wibble blorp zug wibble zug";
    let result = engine.score(gibberish, 60.0);

    assert_eq!(metric(&result, MetricId::Salutation).score, 0.0);
    assert_eq!(metric(&result, MetricId::KeywordPresence).score, 0.0);
    assert_eq!(metric(&result, MetricId::Flow).score, 0.0);

    let ttr = metric(&result, MetricId::VocabularyRichness);
    assert_eq!(ttr.score, 2.0);
    assert_eq!(ttr.details, "Poor vocabulary diversity");

    assert!(result.overall_score < 40.0);
}

#[test]
fn result_round_trips_through_json() {
    let engine = ScoringEngine::new().unwrap();
    let result = engine.score(STUDENT_TRANSCRIPT, 52.0);

    let json = serde_json::to_string(&result).unwrap();
    let back: ScoreResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back.overall_score, result.overall_score);
    assert_eq!(back.grade, result.grade);
    assert_eq!(back.criteria.len(), result.criteria.len());
    for (a, b) in back.criteria.iter().zip(result.criteria.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.score, b.score);
    }
}

#[tokio::test]
async fn advanced_path_blends_coherence_and_reports_conciseness() {
    // Every sentence gets the same embedding, so every consecutive
    // pair has similarity 1.0
    let embedder = EmbedderHandle::from_embedder(Arc::new(ConstantEmbedder {
        vector: vec![0.6, 0.8],
    }));
    let engine = ScoringEngine::new().unwrap().with_embedder(embedder);
    let result = engine.score_advanced(STUDENT_TRANSCRIPT, 52.0).await;

    let flow = metric(&result, MetricId::FlowCoherence);
    // basic flow 5 blends with coherence 10
    assert_eq!(flow.score, 8.0);
    assert!(flow.details.contains("Coherence: 10/10"));

    // Tone criterion only exists on the advanced rubric
    let tone = criterion(&result, CriterionId::ToneRegister);
    assert!(tone.score > 0.0);

    let conciseness = result.conciseness_analysis.as_ref().unwrap();
    assert!(!conciseness.summary.is_empty());
    assert!(conciseness.core_message_density >= 0.0);

    // No enrichment client configured: local heuristics, no summary block
    assert_eq!(result.scoring_method, ScoringMethod::LocalHeuristics);
    assert!(result.enrichment.is_none());

    // Advanced path keeps per-metric insights
    assert!(metric(&result, MetricId::Politeness).insights.is_some());
}

#[tokio::test]
async fn enrichment_signals_blend_into_a_hybrid_score() {
    let baseline = ScoringEngine::new()
        .unwrap()
        .score_advanced(STUDENT_TRANSCRIPT, 52.0)
        .await;
    assert_eq!(baseline.scoring_method, ScoringMethod::LocalHeuristics);

    let summary = EnrichmentSummary {
        sentiment: BranchOutcome::ok(0.9),
        quality: BranchOutcome::ok(0.75),
        clarity: BranchOutcome::ok(0.9),
        professionalism: BranchOutcome::ok(0.85),
        completeness: 0.9,
        structure: 0.8,
        engagement: 0.4,
        confidence: 1.0,
    };
    // .25*.9 + .30*.9 + .20*.85 + .15*.4 + .10*.8 = .805
    let composite = summary.composite_score();
    assert!((composite - 80.5).abs() < 1e-9);

    let engine = ScoringEngine::new()
        .unwrap()
        .with_enrichment(FixedAnalyzer { summary });
    let result = engine.score_advanced(STUDENT_TRANSCRIPT, 52.0).await;

    assert_eq!(result.scoring_method, ScoringMethod::Hybrid);
    let expected = (baseline.overall_score * 0.5 + composite * 0.5).round();
    assert_eq!(result.overall_score, expected);

    // Signal-level feedback joins the criterion-derived channels
    let insights = result.insights.as_ref().unwrap();
    assert!(insights
        .strengths
        .iter()
        .any(|s| s == "Clear and well-structured communication"));
    assert!(insights
        .improvements
        .iter()
        .any(|s| s == "Add more enthusiasm and engaging language"));

    let carried = result.enrichment.as_ref().unwrap();
    assert_eq!(carried.confidence, 1.0);
    assert!(!carried.sentiment.is_fallback());
}

#[test]
fn invalid_rubrics_are_rejected_up_front() {
    let mut set = RubricSet::builtin();
    set.basic.criteria[0].weight = 0.05;
    assert!(ScoringEngine::with_rubrics(set).is_err());

    let doc = r#"
        [[criteria]]
        id = "clarity"
        name = "Clarity"
        weight = 1.5
        max_score = 15.0
        [[criteria.metrics]]
        id = "filler_word_rate"
        name = "Filler Word Rate"
        max_score = 15.0
    "#;
    assert!(Rubric::from_toml_str(doc).is_err());
}
