//! Rubric definition, loading, and validation
//!
//! A `Rubric` is the single source of truth for what gets scored: the
//! criteria and their weights, each metric's maximum, the band tables
//! that map measured values to points, and the word lists the
//! evaluators consult. Rubrics are validated when constructed, so a
//! malformed document fails at load time and never mid-request.
//!
//! Criteria and metrics carry stable typed identifiers; nothing in the
//! engine addresses them by position.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RubricError;
use crate::lexicon;

/// Stable criterion identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    ContentStructure,
    ToneRegister,
    SpeechRate,
    LanguageGrammar,
    Clarity,
    Engagement,
}

/// Stable metric identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Salutation,
    KeywordPresence,
    Flow,
    FlowCoherence,
    SpeechRate,
    GrammarErrors,
    VocabularyRichness,
    FillerWordRate,
    SentimentPositivity,
    Politeness,
    Professionalism,
}

/// One row of a band table: inclusive `[min, max]` maps to `score`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringBand {
    /// Level label used in detail strings (e.g. "excellent", "Fast")
    pub level: String,
    pub min: f64,
    pub max: f64,
    pub score: f64,
}

/// Result of a band table lookup
#[derive(Debug, Clone, Copy)]
pub struct BandHit<'a> {
    /// Matched level label, or the fallback label on a miss
    pub level: &'a str,
    pub score: f64,
    /// True when no row matched and the fallback applied
    pub miss: bool,
}

/// Ordered band table with an explicit fallback
///
/// Lookup is first-match-wins over inclusive bounds. Gaps between rows
/// are reachable; a value that matches no row resolves to the declared
/// fallback score, never to an error and never silently to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTable {
    pub fallback_score: f64,
    pub fallback_label: String,
    pub bands: Vec<ScoringBand>,
}

impl BandTable {
    /// Map a measured value to a band score
    pub fn lookup(&self, value: f64) -> BandHit<'_> {
        for band in &self.bands {
            if value >= band.min && value <= band.max {
                return BandHit {
                    level: &band.level,
                    score: band.score,
                    miss: false,
                };
            }
        }
        BandHit {
            level: &self.fallback_label,
            score: self.fallback_score,
            miss: true,
        }
    }

    fn validate(&self, metric: &str) -> Result<(), RubricError> {
        for band in &self.bands {
            if band.min > band.max {
                return Err(RubricError::InvertedBand {
                    metric: metric.to_string(),
                    level: band.level.clone(),
                    min: band.min,
                    max: band.max,
                });
            }
        }
        for pair in self.bands.windows(2) {
            if pair[1].min < pair[0].min {
                return Err(RubricError::UnsortedBands {
                    metric: metric.to_string(),
                });
            }
            if pair[1].min < pair[0].max {
                return Err(RubricError::OverlappingBands {
                    metric: metric.to_string(),
                    lower: pair[0].level.clone(),
                    upper: pair[1].level.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Flat-scored keyword pool with a cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordPool {
    pub keywords: Vec<String>,
    pub score_each: f64,
    pub max_score: f64,
}

impl KeywordPool {
    /// Score a lowercased transcript against this pool
    ///
    /// Substring containment, capped total, found keywords returned in
    /// pool order.
    pub fn score(&self, lower: &str) -> (f64, Vec<&str>) {
        let mut found = Vec::new();
        let mut total = 0.0;
        for keyword in &self.keywords {
            if lower.contains(keyword.as_str()) {
                total += self.score_each;
                found.push(keyword.as_str());
            }
        }
        (total.min(self.max_score), found)
    }
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_must_have() -> KeywordPool {
    KeywordPool {
        keywords: strings(lexicon::MUST_HAVE_KEYWORDS),
        score_each: lexicon::MUST_HAVE_SCORE_EACH,
        max_score: lexicon::MUST_HAVE_CAP,
    }
}

fn default_good_to_have() -> KeywordPool {
    KeywordPool {
        keywords: strings(lexicon::GOOD_TO_HAVE_KEYWORDS),
        score_each: lexicon::GOOD_TO_HAVE_SCORE_EACH,
        max_score: lexicon::GOOD_TO_HAVE_CAP,
    }
}

fn default_fillers() -> Vec<String> {
    strings(lexicon::FILLER_WORDS)
}

fn default_polite() -> Vec<String> {
    strings(lexicon::POLITE_MARKERS)
}

fn default_professional() -> Vec<String> {
    strings(lexicon::PROFESSIONAL_MARKERS)
}

fn default_informal() -> Vec<String> {
    strings(lexicon::INFORMAL_MARKERS)
}

fn default_positive() -> Vec<String> {
    strings(lexicon::POSITIVE_WORDS)
}

fn default_negative() -> Vec<String> {
    strings(lexicon::NEGATIVE_WORDS)
}

fn default_summary_keywords() -> Vec<String> {
    strings(lexicon::SUMMARY_KEYWORDS)
}

fn default_core_message() -> Vec<String> {
    strings(lexicon::CORE_MESSAGE_KEYWORDS)
}

fn default_contractions() -> Vec<String> {
    strings(lexicon::DROPPED_APOSTROPHE_TOKENS)
}

/// Word lists the evaluators consult, all overridable per rubric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordLists {
    #[serde(default = "default_fillers")]
    pub filler_words: Vec<String>,
    #[serde(default = "default_polite")]
    pub polite_markers: Vec<String>,
    #[serde(default = "default_professional")]
    pub professional_markers: Vec<String>,
    #[serde(default = "default_informal")]
    pub informal_markers: Vec<String>,
    #[serde(default = "default_positive")]
    pub positive_words: Vec<String>,
    #[serde(default = "default_negative")]
    pub negative_words: Vec<String>,
    #[serde(default = "default_summary_keywords")]
    pub summary_keywords: Vec<String>,
    #[serde(default = "default_core_message")]
    pub core_message_keywords: Vec<String>,
    #[serde(default = "default_contractions")]
    pub dropped_apostrophe_tokens: Vec<String>,
    #[serde(default = "default_must_have")]
    pub must_have: KeywordPool,
    #[serde(default = "default_good_to_have")]
    pub good_to_have: KeywordPool,
}

impl Default for WordLists {
    fn default() -> Self {
        Self {
            filler_words: default_fillers(),
            polite_markers: default_polite(),
            professional_markers: default_professional(),
            informal_markers: default_informal(),
            positive_words: default_positive(),
            negative_words: default_negative(),
            summary_keywords: default_summary_keywords(),
            core_message_keywords: default_core_message(),
            dropped_apostrophe_tokens: default_contractions(),
            must_have: default_must_have(),
            good_to_have: default_good_to_have(),
        }
    }
}

/// One metric within a criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDef {
    pub id: MetricId,
    pub name: String,
    pub max_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<BandTable>,
}

/// One weighted criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionDef {
    pub id: CriterionId,
    pub name: String,
    pub weight: f64,
    pub max_score: f64,
    pub metrics: Vec<MetricDef>,
}

/// Complete scoring rubric: criteria, band tables, word lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub criteria: Vec<CriterionDef>,
    #[serde(default)]
    pub words: WordLists,
}

const WEIGHT_TOLERANCE: f64 = 1e-6;

impl Rubric {
    /// Built-in five-criterion rubric for the basic scoring path
    pub fn builtin() -> Self {
        Rubric {
            criteria: vec![
                CriterionDef {
                    id: CriterionId::ContentStructure,
                    name: "Content & Structure".into(),
                    weight: 0.40,
                    max_score: 40.0,
                    metrics: vec![
                        MetricDef {
                            id: MetricId::Salutation,
                            name: "Salutation Level".into(),
                            max_score: 5.0,
                            bands: None,
                        },
                        MetricDef {
                            id: MetricId::KeywordPresence,
                            name: "Key Word Presence".into(),
                            max_score: 30.0,
                            bands: None,
                        },
                        MetricDef {
                            id: MetricId::Flow,
                            name: "Flow".into(),
                            max_score: 5.0,
                            bands: None,
                        },
                    ],
                },
                CriterionDef {
                    id: CriterionId::SpeechRate,
                    name: "Speech Rate".into(),
                    weight: 0.10,
                    max_score: 10.0,
                    metrics: vec![MetricDef {
                        id: MetricId::SpeechRate,
                        name: "Speech Rate".into(),
                        max_score: 10.0,
                        bands: Some(speech_rate_bands()),
                    }],
                },
                CriterionDef {
                    id: CriterionId::LanguageGrammar,
                    name: "Language & Grammar".into(),
                    weight: 0.20,
                    max_score: 20.0,
                    metrics: vec![
                        MetricDef {
                            id: MetricId::GrammarErrors,
                            name: "Grammar Errors".into(),
                            max_score: 10.0,
                            bands: Some(grammar_bands()),
                        },
                        MetricDef {
                            id: MetricId::VocabularyRichness,
                            name: "Vocabulary Richness (TTR)".into(),
                            max_score: 10.0,
                            bands: Some(ttr_bands()),
                        },
                    ],
                },
                CriterionDef {
                    id: CriterionId::Clarity,
                    name: "Clarity".into(),
                    weight: 0.15,
                    max_score: 15.0,
                    metrics: vec![MetricDef {
                        id: MetricId::FillerWordRate,
                        name: "Filler Word Rate".into(),
                        max_score: 15.0,
                        bands: Some(filler_bands()),
                    }],
                },
                CriterionDef {
                    id: CriterionId::Engagement,
                    name: "Engagement".into(),
                    weight: 0.15,
                    max_score: 15.0,
                    metrics: vec![MetricDef {
                        id: MetricId::SentimentPositivity,
                        name: "Sentiment/Positivity".into(),
                        max_score: 15.0,
                        bands: Some(positivity_bands()),
                    }],
                },
            ],
            words: WordLists::default(),
        }
    }

    /// Built-in six-criterion rubric for the advanced path
    ///
    /// Adds Tone & Register and replaces the boolean Flow metric with a
    /// 10-point Flow & Coherence blend; weights are rebalanced to keep
    /// summing to 1.0.
    pub fn builtin_advanced() -> Self {
        let mut rubric = Self::builtin();

        let content = &mut rubric.criteria[0];
        content.weight = 0.35;
        content.max_score = 45.0;
        content.metrics[2] = MetricDef {
            id: MetricId::FlowCoherence,
            name: "Flow & Coherence".into(),
            max_score: 10.0,
            bands: None,
        };

        rubric.criteria.insert(
            1,
            CriterionDef {
                id: CriterionId::ToneRegister,
                name: "Tone & Register".into(),
                weight: 0.10,
                max_score: 20.0,
                metrics: vec![
                    MetricDef {
                        id: MetricId::Politeness,
                        name: "Politeness Level".into(),
                        max_score: 10.0,
                        bands: None,
                    },
                    MetricDef {
                        id: MetricId::Professionalism,
                        name: "Professionalism".into(),
                        max_score: 10.0,
                        bands: None,
                    },
                ],
            },
        );

        if let Some(engagement) = rubric
            .criteria
            .iter_mut()
            .find(|c| c.id == CriterionId::Engagement)
        {
            engagement.weight = 0.10;
        }

        rubric
    }

    /// Parse a rubric from a TOML document and validate it
    pub fn from_toml_str(doc: &str) -> Result<Self, RubricError> {
        let rubric: Rubric = toml::from_str(doc)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Load and validate a rubric file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path)?;
        let rubric = Self::from_toml_str(&doc)?;
        info!(path = %path.display(), criteria = rubric.criteria.len(), "rubric loaded");
        Ok(rubric)
    }

    /// Find a criterion by its typed identifier
    pub fn criterion(&self, id: CriterionId) -> Option<&CriterionDef> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Check structural invariants, failing fast on the first violation
    pub fn validate(&self) -> Result<(), RubricError> {
        if self.criteria.is_empty() {
            return Err(RubricError::Empty);
        }

        let weight_sum: f64 = self.criteria.iter().map(|c| c.weight).sum();
        if (weight_sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(RubricError::WeightSum(weight_sum));
        }

        for criterion in &self.criteria {
            if criterion.weight <= 0.0 || criterion.weight > 1.0 {
                return Err(RubricError::InvalidWeight(criterion.name.clone()));
            }

            let metric_total: f64 = criterion.metrics.iter().map(|m| m.max_score).sum();
            if (metric_total - criterion.max_score).abs() > WEIGHT_TOLERANCE {
                return Err(RubricError::MaxScoreMismatch {
                    criterion: criterion.name.clone(),
                    declared: criterion.max_score,
                    actual: metric_total,
                });
            }

            for metric in &criterion.metrics {
                if let Some(bands) = &metric.bands {
                    bands.validate(&metric.name)?;
                }
            }
        }

        Ok(())
    }
}

fn band(level: &str, min: f64, max: f64, score: f64) -> ScoringBand {
    ScoringBand {
        level: level.to_string(),
        min,
        max,
        score,
    }
}

fn speech_rate_bands() -> BandTable {
    BandTable {
        fallback_score: 2.0,
        fallback_label: "Too slow or too fast".into(),
        bands: vec![
            band("Slow", 81.0, 110.0, 6.0),
            band("Ideal", 111.0, 140.0, 10.0),
            band("Fast", 141.0, 160.0, 6.0),
        ],
    }
}

fn grammar_bands() -> BandTable {
    BandTable {
        fallback_score: 2.0,
        fallback_label: "Poor: Many errors detected".into(),
        bands: vec![
            band("poor", 0.3, 0.5, 4.0),
            band("average", 0.5, 0.7, 6.0),
            band("good", 0.7, 0.9, 8.0),
            band("excellent", 0.9, 1.0, 10.0),
        ],
    }
}

fn ttr_bands() -> BandTable {
    BandTable {
        fallback_score: 2.0,
        fallback_label: "Poor vocabulary diversity".into(),
        bands: vec![
            band("poor", 0.3, 0.5, 4.0),
            band("average", 0.5, 0.7, 6.0),
            band("good", 0.7, 0.8, 8.0),
            band("excellent", 0.8, 1.0, 10.0),
        ],
    }
}

fn filler_bands() -> BandTable {
    BandTable {
        fallback_score: 3.0,
        fallback_label: "Poor: Too many filler words".into(),
        bands: vec![
            band("excellent", 0.0, 3.0, 15.0),
            band("good", 3.0, 6.0, 12.0),
            band("average", 6.0, 10.0, 8.0),
            band("poor", 10.0, 100.0, 4.0),
        ],
    }
}

fn positivity_bands() -> BandTable {
    BandTable {
        fallback_score: 3.0,
        fallback_label: "Poor: Negative or neutral tone".into(),
        bands: vec![
            band("negative", 0.0, 0.2, 3.0),
            band("neutral", 0.2, 0.45, 5.0),
            band("average", 0.45, 0.75, 8.0),
            band("good", 0.75, 0.9, 12.0),
            band("excellent", 0.9, 1.0, 15.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_rubrics_validate() {
        Rubric::builtin().validate().unwrap();
        Rubric::builtin_advanced().validate().unwrap();
    }

    #[test]
    fn builtin_maxima_sum() {
        let basic: f64 = Rubric::builtin().criteria.iter().map(|c| c.max_score).sum();
        assert_eq!(basic, 100.0);

        let advanced = Rubric::builtin_advanced();
        let weights: f64 = advanced.criteria.iter().map(|c| c.weight).sum();
        assert!((weights - 1.0).abs() < 1e-9);
    }

    #[test]
    fn band_lookup_first_match_and_fallback() {
        let table = speech_rate_bands();
        assert_eq!(table.lookup(120.0).score, 10.0);
        assert_eq!(table.lookup(153.0).level, "Fast");
        assert_eq!(table.lookup(153.0).score, 6.0);

        // Gap below the first row resolves to the fallback, not zero
        let miss = table.lookup(40.0);
        assert!(miss.miss);
        assert_eq!(miss.score, 2.0);
        assert_eq!(miss.level, "Too slow or too fast");
    }

    #[test]
    fn band_boundary_is_inclusive_and_first_wins() {
        let table = positivity_bands();
        // 0.75 sits on a shared boundary; the earlier row wins
        assert_eq!(table.lookup(0.75).level, "average");
        assert_eq!(table.lookup(0.9).level, "good");
    }

    #[test]
    fn keyword_pool_caps_and_reports() {
        let pool = KeywordPool {
            keywords: vec!["alpha".into(), "beta".into(), "gamma".into()],
            score_each: 4.0,
            max_score: 8.0,
        };
        let (score, found) = pool.score("alpha beta gamma all present");
        assert_eq!(score, 8.0);
        assert_eq!(found, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn rejects_bad_weight_sum() {
        let mut rubric = Rubric::builtin();
        rubric.criteria[0].weight = 0.5;
        assert!(matches!(rubric.validate(), Err(RubricError::WeightSum(_))));
    }

    #[test]
    fn rejects_max_score_mismatch() {
        let mut rubric = Rubric::builtin();
        rubric.criteria[0].max_score = 50.0;
        assert!(matches!(
            rubric.validate(),
            Err(RubricError::MaxScoreMismatch { .. })
        ));
    }

    #[test]
    fn rejects_overlapping_bands() {
        let mut rubric = Rubric::builtin();
        let bands = rubric.criteria[1].metrics[0].bands.as_mut().unwrap();
        bands.bands[1].min = 100.0; // overlaps the Slow row (81-110)
        assert!(matches!(
            rubric.validate(),
            Err(RubricError::OverlappingBands { .. })
        ));
    }

    #[test]
    fn rejects_unsorted_bands() {
        let mut rubric = Rubric::builtin();
        let bands = rubric.criteria[1].metrics[0].bands.as_mut().unwrap();
        bands.bands.swap(0, 2);
        assert!(matches!(
            rubric.validate(),
            Err(RubricError::UnsortedBands { .. })
        ));
    }

    #[test]
    fn toml_round_trip_preserves_structure() {
        let rubric = Rubric::builtin();
        let doc = toml::to_string(&rubric).unwrap();
        let parsed = Rubric::from_toml_str(&doc).unwrap();
        assert_eq!(parsed.criteria.len(), rubric.criteria.len());
        assert_eq!(parsed.criteria[0].id, CriterionId::ContentStructure);
        assert_eq!(parsed.words.filler_words, rubric.words.filler_words);
    }

    #[test]
    fn load_from_file() {
        let rubric = Rubric::builtin_advanced();
        let doc = toml::to_string(&rubric).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(doc.as_bytes()).unwrap();

        let loaded = Rubric::load(file.path()).unwrap();
        assert_eq!(loaded.criteria.len(), 6);
        assert!(loaded.criterion(CriterionId::ToneRegister).is_some());
    }

    #[test]
    fn load_rejects_malformed_document() {
        let err = Rubric::from_toml_str("criteria = 3").unwrap_err();
        assert!(matches!(err, RubricError::Parse(_)));
    }
}
