//! Remote enrichment client
//!
//! Four independent model calls against a hosted inference API:
//! sentiment, introduction-quality classification, clarity via
//! summarization, and a professionalism rating. Every call carries its
//! own timeout and degrades to a neutral 0.5 with the reason recorded;
//! there are no retries and one call's failure never cancels another.
//! Confidence is simply `successful_calls / total_calls`.
//!
//! Normalization from the provider's heterogeneous JSON to fixed
//! 0.0-1.0 scales lives here, as pure functions, so it is testable
//! without a network.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::EnrichmentError;
use crate::text::{contains_phrase, sentences};
use crate::types::{BranchOutcome, EnrichmentSummary};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
const GENERATION_MODEL: &str = "microsoft/DialoGPT-medium";
const SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
const USER_AGENT: &str = concat!("introscore/", env!("CARGO_PKG_VERSION"));

/// Neutral value every degraded signal falls back to
const NEUTRAL: f64 = 0.5;

/// Enrichment client configuration
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Inference API base URL (overridable for tests)
    pub base_url: String,
    /// Bearer token, if the provider requires one
    pub api_token: Option<String>,
    /// Per-call timeout
    pub call_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// Enrichment capability the engine consumes
///
/// `EnrichmentClient` is the production implementation; tests inject
/// canned or failing analyzers through the same seam.
#[async_trait::async_trait]
pub trait EnrichmentAnalyzer: Send + Sync {
    /// Produce the enrichment summary for one transcript
    async fn analyze(&self, transcript: &str) -> EnrichmentSummary;
}

/// Remote enrichment client
pub struct EnrichmentClient {
    http_client: reqwest::Client,
    config: EnrichmentConfig,
}

impl EnrichmentClient {
    /// Create a client with per-call timeouts baked into the transport
    pub fn new(config: EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.call_timeout)
            .build()
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn run_analysis(&self, transcript: &str) -> EnrichmentSummary {
        let (sentiment, quality, clarity, professionalism) = tokio::join!(
            self.sentiment(transcript),
            self.quality(transcript),
            self.clarity(transcript),
            self.professionalism(transcript),
        );

        let outcomes = [&sentiment, &quality, &clarity, &professionalism];
        let successful = outcomes.iter().filter(|o| !o.is_fallback()).count();
        let confidence = successful as f64 / outcomes.len() as f64;

        for outcome in outcomes {
            if let Some(reason) = outcome.reason() {
                warn!(reason, "enrichment call degraded");
            }
        }
        debug!(confidence, "enrichment analysis complete");

        EnrichmentSummary {
            sentiment,
            quality,
            clarity,
            professionalism,
            completeness: local_completeness(transcript),
            structure: local_structure(transcript),
            engagement: local_engagement(transcript),
            confidence,
        }
    }

    async fn sentiment(&self, text: &str) -> BranchOutcome<f64> {
        match self.post(SENTIMENT_MODEL, json!({ "inputs": text })).await {
            Ok(value) => BranchOutcome::ok(normalize_sentiment(&value)),
            Err(e) => BranchOutcome::fallback(NEUTRAL, e.to_string()),
        }
    }

    async fn quality(&self, text: &str) -> BranchOutcome<f64> {
        let prompt = format!(
            "Classify this self-introduction as \"Excellent\", \"Good\", \"Average\", or \"Poor\": \"{}\"",
            truncate(text, 500)
        );
        match self.post(GENERATION_MODEL, json!({ "inputs": prompt })).await {
            Ok(value) => BranchOutcome::ok(normalize_quality(&value)),
            Err(e) => BranchOutcome::fallback(NEUTRAL, e.to_string()),
        }
    }

    async fn clarity(&self, text: &str) -> BranchOutcome<f64> {
        let body = json!({
            "inputs": text,
            "parameters": { "max_length": 150, "min_length": 30, "do_sample": false }
        });
        match self.post(SUMMARIZATION_MODEL, body).await {
            Ok(value) => BranchOutcome::ok(clarity_score(text, &value)),
            Err(e) => BranchOutcome::fallback(NEUTRAL, e.to_string()),
        }
    }

    async fn professionalism(&self, text: &str) -> BranchOutcome<f64> {
        let prompt = format!(
            "Rate the professionalism of this introduction from 0-10: \"{}\". Consider language, tone, and appropriateness.",
            truncate(text, 300)
        );
        match self.post(GENERATION_MODEL, json!({ "inputs": prompt })).await {
            Ok(value) => BranchOutcome::ok(normalize_professionalism(&value)),
            Err(e) => BranchOutcome::fallback(NEUTRAL, e.to_string()),
        }
    }

    async fn post(&self, model: &str, body: Value) -> Result<Value, EnrichmentError> {
        let url = format!("{}/{}", self.config.base_url, model);
        debug!(model, "enrichment request");

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EnrichmentError::Timeout(self.config.call_timeout)
            } else {
                EnrichmentError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Api(status.as_u16(), text));
        }

        response
            .json()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl EnrichmentAnalyzer for EnrichmentClient {
    /// Run all four enrichment calls concurrently
    ///
    /// Always returns a usable summary; failed calls appear as
    /// fallbacks with their reasons, and the local completeness,
    /// structure, and engagement estimates are computed regardless.
    async fn analyze(&self, transcript: &str) -> EnrichmentSummary {
        self.run_analysis(transcript).await
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Positive-label score from a `[[{label, score}, ...]]` response
///
/// Missing or zero positive score normalizes to neutral.
pub fn normalize_sentiment(value: &Value) -> f64 {
    let Some(scores) = value.get(0).and_then(Value::as_array) else {
        return NEUTRAL;
    };

    let mut positive = 0.0;
    for item in scores {
        let label = item.get("label").and_then(Value::as_str).unwrap_or("");
        if label.to_lowercase().contains("pos") {
            positive = item.get("score").and_then(Value::as_f64).unwrap_or(0.0);
        }
    }

    if positive > 0.0 {
        positive
    } else {
        NEUTRAL
    }
}

/// Map generated classification text to a fixed quality scale
pub fn normalize_quality(value: &Value) -> f64 {
    let Some(text) = value.get(0).and_then(|v| v.get("generated_text")).and_then(Value::as_str)
    else {
        return NEUTRAL;
    };

    let lower = text.to_lowercase();
    if lower.contains("excellent") {
        0.9
    } else if lower.contains("good") {
        0.75
    } else if lower.contains("poor") {
        0.25
    } else {
        NEUTRAL
    }
}

/// Clarity from summarization compression ratio
///
/// A summary that compresses to 30-70% of the original reads as clear;
/// outside 20-80% the local sentence-length heuristic decides instead.
pub fn clarity_score(original: &str, value: &Value) -> f64 {
    let Some(summary) = value.get(0).and_then(|v| v.get("summary_text")).and_then(Value::as_str)
    else {
        return basic_clarity(original);
    };

    if original.is_empty() {
        return basic_clarity(original);
    }
    let ratio = summary.len() as f64 / original.len() as f64;
    if (0.3..=0.7).contains(&ratio) {
        0.8
    } else if (0.2..=0.8).contains(&ratio) {
        0.6
    } else {
        basic_clarity(original)
    }
}

/// Sentence-length clarity heuristic used when no summary is available
pub fn basic_clarity(text: &str) -> f64 {
    let sentence_count = sentences(text).len();
    if sentence_count == 0 {
        return 0.4;
    }
    let avg_len = text.len() as f64 / sentence_count as f64;
    if (10.0..=25.0).contains(&avg_len) {
        0.7
    } else if (8.0..=30.0).contains(&avg_len) {
        0.6
    } else {
        0.4
    }
}

/// First standalone integer 0-10 in the generated text, over 10
pub fn normalize_professionalism(value: &Value) -> f64 {
    let Some(text) = value.get(0).and_then(|v| v.get("generated_text")).and_then(Value::as_str)
    else {
        return NEUTRAL;
    };

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let run = &text[start..i];
            // Single digits and exactly "10" qualify; "15" does not
            if run.len() == 1 || run == "10" {
                if let Ok(n) = run.parse::<u32>() {
                    return n.min(10) as f64 / 10.0;
                }
            }
        } else {
            i += 1;
        }
    }
    NEUTRAL
}

/// Locally estimated introduction completeness from weighted pattern groups
pub fn local_completeness(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let groups: [(&[&str], f64); 7] = [
        (&["name", "i am", "i'm"], 0.2),
        (&["age", "years old", "year old"], 0.15),
        (&["school", "class", "grade", "study", "student"], 0.15),
        (&["family", "mother", "father", "parent", "brother", "sister"], 0.15),
        (&["hobby", "interest", "like", "enjoy", "play"], 0.15),
        (&["goal", "dream", "future", "want", "become", "aspire"], 0.1),
        (&["thank", "appreciate", "pleasure"], 0.1),
    ];

    let mut score = 0.0;
    for (patterns, weight) in groups {
        if patterns.iter().any(|p| contains_phrase(&lower, p)) {
            score += weight;
        }
    }
    score.min(1.0)
}

const ENGAGING_WORDS: &[&str] = &[
    "excited",
    "passionate",
    "love",
    "enjoy",
    "proud",
    "happy",
    "grateful",
    "enthusiastic",
    "thrilled",
    "delighted",
    "interested",
];

/// Locally estimated engaging-language level: `min(1, hits / 3)` over
/// the engaging-word list
pub fn local_engagement(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let hits = ENGAGING_WORDS.iter().filter(|w| lower.contains(**w)).count();
    (hits as f64 / 3.0).min(1.0)
}

/// Locally estimated structure: proper opening, closing, sensible length
pub fn local_structure(text: &str) -> f64 {
    let sentence_list = sentences(text);
    let mut score: f64 = 0.3;

    if let Some(first) = sentence_list.first() {
        let first = first.to_lowercase();
        if first.contains("hello")
            || first.contains("hi")
            || first.contains("good morning")
            || first.contains("good afternoon")
        {
            score += 0.2;
        }
    }

    if sentence_list.len() > 1 {
        if let Some(last) = sentence_list.last() {
            let last = last.to_lowercase();
            if last.contains("thank") || last.contains("appreciate") || last.contains("pleasure") {
                score += 0.2;
            }
        }
    }

    if (3..=8).contains(&sentence_list.len()) {
        score += 0.3;
    }

    score.min(1.0)
}
