//! Content & Structure evaluators: salutation, keyword coverage, flow

use crate::rubric::MetricDef;
use crate::rubric::WordLists;
use crate::semantic::coherence::CoherenceAnalysis;
use crate::types::{MetricInsights, MetricScore};

use super::EvalContext;

/// Tiered salutation detection, highest matching tier wins
pub fn salutation(def: &MetricDef, ctx: &EvalContext<'_>) -> MetricScore {
    let lower = &ctx.lower;
    let (score, details) = if lower.contains("excited") || lower.contains("feeling great") {
        (5.0, "Excellent - Shows enthusiasm")
    } else if lower.contains("good morning")
        || lower.contains("good afternoon")
        || lower.contains("good evening")
        || lower.contains("good day")
        || lower.contains("hello everyone")
    {
        (4.0, "Good - Professional greeting")
    } else if lower.contains("hello") || lower.contains("hi") {
        (2.0, "Normal - Basic greeting")
    } else {
        (0.0, "No salutation detected")
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score,
        max_score: def.max_score,
        details: details.to_string(),
        insights: None,
    }
}

/// Flat-scored keyword coverage over the must-have and good-to-have pools
pub fn keyword_presence(def: &MetricDef, ctx: &EvalContext<'_>, words: &WordLists) -> MetricScore {
    let (must_score, found_must) = words.must_have.score(&ctx.lower);
    let (good_score, found_good) = words.good_to_have.score(&ctx.lower);

    let details = format!(
        "Must-have found: [{}] ({}/{}), Good-to-have found: [{}] ({}/{})",
        found_must.join(", "),
        must_score,
        words.must_have.max_score,
        found_good.join(", "),
        good_score,
        words.good_to_have.max_score,
    );

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Found {} must-have and {} good-to-have keywords",
            found_must.len(),
            found_good.len()
        )),
        recommendations: if must_score < words.must_have.max_score {
            vec![
                "Include your name, age, class, and school".into(),
                "Mention your family and hobbies/interests".into(),
            ]
        } else {
            Vec::new()
        },
        detected_strengths: if found_must.len() > 3 {
            vec![
                "Good coverage of must-have keywords".into(),
                "Comprehensive personal information provided".into(),
            ]
        } else {
            Vec::new()
        },
        ..Default::default()
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score: must_score + good_score,
        max_score: def.max_score,
        details,
        insights: Some(insights),
    }
}

/// The four structural gates the flow check requires
pub fn flow_gates(lower: &str) -> [bool; 4] {
    let has_salutation =
        lower.contains("hello") || lower.contains("hi") || lower.contains("good");
    let has_basic_details =
        lower.contains("years old") || lower.contains("class") || lower.contains("school");
    let has_additional_details = lower.contains("family")
        || lower.contains("hobby")
        || lower.contains("interest")
        || lower.contains("fact");
    let has_closing = lower.contains("thank you") || lower.contains("that");
    [
        has_salutation,
        has_basic_details,
        has_additional_details,
        has_closing,
    ]
}

fn basic_flow_score(lower: &str) -> f64 {
    if flow_gates(lower).iter().all(|g| *g) {
        5.0
    } else {
        0.0
    }
}

/// All-or-nothing structural flow check
pub fn flow(def: &MetricDef, ctx: &EvalContext<'_>) -> MetricScore {
    let score = basic_flow_score(&ctx.lower);
    let details = if score > 0.0 {
        "Proper flow followed"
    } else {
        "Flow needs improvement"
    };

    MetricScore {
        id: def.id,
        name: def.name.clone(),
        score,
        max_score: def.max_score,
        details: details.to_string(),
        insights: None,
    }
}

/// Advanced blend of the boolean flow gates with embedding coherence
///
/// `round((basic_flow + coherence) / 2)` out of 10; a missing coherence
/// analysis degrades to the documented neutral 5.
pub fn flow_coherence(
    def: &MetricDef,
    ctx: &EvalContext<'_>,
    coherence: Option<&CoherenceAnalysis>,
) -> MetricScore {
    let neutral = CoherenceAnalysis::neutral("coherence analysis unavailable");
    let analysis = coherence.unwrap_or(&neutral);

    let basic = basic_flow_score(&ctx.lower);
    let score = ((basic + analysis.score) / 2.0).round();

    let details = format!(
        "{}/10 - Basic flow: {}/10, Coherence: {}/10",
        score, basic, analysis.score
    );

    let average_text = analysis
        .average
        .map(|a| format!("{:.2}", a))
        .unwrap_or_else(|| "N/A".to_string());

    let mut recommendations = Vec::new();
    if !analysis.issues.is_empty() {
        for issue in analysis.issues.iter().take(2) {
            let snippet: String = issue.sentence.chars().take(50).collect();
            recommendations.push(format!("Consider improving the transition: \"{}...\"", snippet));
        }
        recommendations.push("Add transition phrases between topics".into());
        recommendations.push("Ensure smooth logical flow between ideas".into());
    }

    let mut detected_issues: Vec<String> = analysis
        .issues
        .iter()
        .map(|issue| {
            format!(
                "Sentence {} has low coherence ({:.0}% similarity)",
                issue.sentence_index + 1,
                issue.similarity * 100.0
            )
        })
        .collect();
    if let Some(reason) = &analysis.fallback_reason {
        detected_issues.push(reason.clone());
    }

    let insights = MetricInsights {
        model_analysis: Some(format!(
            "Discourse coherence analysis shows {} average similarity between sentences",
            average_text
        )),
        recommendations,
        detected_issues,
        detected_strengths: if analysis.score >= 8.0 {
            vec![
                "Good logical flow between sentences".into(),
                "Well-structured discourse".into(),
                "Coherent narrative progression".into(),
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
        details,
        insights: Some(insights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::{MetricId, Rubric};

    fn def(id: MetricId, name: &str, max: f64) -> MetricDef {
        MetricDef {
            id,
            name: name.into(),
            max_score: max,
            bands: None,
        }
    }

    fn ctx<'a>(text: &'a str, words: &WordLists) -> EvalContext<'a> {
        EvalContext::new(text, 60.0, words)
    }

    #[test]
    fn salutation_tiers() {
        let words = WordLists::default();
        let d = def(MetricId::Salutation, "Salutation Level", 5.0);

        let cases = [
            ("I am so excited to be here", 5.0),
            ("Good morning teachers", 4.0),
            ("Hello everyone, I am here", 4.0),
            ("Hello, my name is Ravi", 2.0),
            ("My name is Ravi", 0.0),
        ];
        for (text, expected) in cases {
            let c = ctx(text, &words);
            assert_eq!(salutation(&d, &c).score, expected, "{text}");
        }
    }

    #[test]
    fn salutation_highest_tier_wins() {
        let words = WordLists::default();
        let d = def(MetricId::Salutation, "Salutation Level", 5.0);
        // Contains both "hello everyone" and "excited"; the top tier wins
        let c = ctx("Hello everyone, I am excited to introduce myself", &words);
        assert_eq!(salutation(&d, &c).score, 5.0);
    }

    #[test]
    fn salutation_is_case_insensitive() {
        let words = WordLists::default();
        let d = def(MetricId::Salutation, "Salutation Level", 5.0);
        let upper = ctx("HELLO EVERYONE", &words);
        let lower = ctx("hello everyone", &words);
        assert_eq!(salutation(&d, &upper).score, salutation(&d, &lower).score);
    }

    #[test]
    fn keyword_presence_caps_pools() {
        let rubric = Rubric::builtin();
        let d = def(MetricId::KeywordPresence, "Key Word Presence", 30.0);
        // Six must-have hits would be 24 raw; capped at 20
        let c = ctx(
            "my name, age, class, school, family and interests, a fun fact and my goal",
            &rubric.words,
        );
        let m = keyword_presence(&d, &c, &rubric.words);
        // good-to-have hits: "goal" and "fun fact"
        assert_eq!(m.score, 20.0 + 4.0);
        assert!(m.details.starts_with("Must-have found: ["));
    }

    #[test]
    fn flow_is_all_or_nothing() {
        let words = WordLists::default();
        let d = def(MetricId::Flow, "Flow", 5.0);

        let complete = "Hello everyone. I am in class five at my school. I love my family. Thank you.";
        let c = ctx(complete, &words);
        assert_eq!(flow(&d, &c).score, 5.0);

        // Remove any single gate and the whole score collapses to 0
        let missing_closing = "Hello everyone. I am in class five. I love my family.";
        let c = ctx(missing_closing, &words);
        assert_eq!(flow(&d, &c).score, 0.0);

        let missing_salutation = "I am in class five. I love my family. Thank you.";
        let c = ctx(missing_salutation, &words);
        assert_eq!(flow(&d, &c).score, 0.0);
    }

    #[test]
    fn flow_coherence_blends_and_rounds() {
        let words = WordLists::default();
        let d = def(MetricId::FlowCoherence, "Flow & Coherence", 10.0);
        let complete = "Hello everyone. I am in class five at my school. I love my family. Thank you.";
        let c = ctx(complete, &words);

        let analysis = CoherenceAnalysis {
            score: 8.0,
            ..CoherenceAnalysis::neutral("unused")
        };
        let m = flow_coherence(&d, &c, Some(&analysis));
        // round((5 + 8) / 2) = 7 (ties round half away from zero)
        assert_eq!(m.score, 7.0);
    }

    #[test]
    fn flow_coherence_defaults_without_analysis() {
        let words = WordLists::default();
        let d = def(MetricId::FlowCoherence, "Flow & Coherence", 10.0);
        let c = ctx("No greeting here at all", &words);
        let m = flow_coherence(&d, &c, None);
        // basic flow 0, neutral coherence 5 -> round(2.5) = 3
        assert_eq!(m.score, 3.0);
    }
}
