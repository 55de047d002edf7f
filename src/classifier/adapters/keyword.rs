//! Deterministic keyword classifier standing in for the AI service.

use crate::classifier::ports::{ClassifierError, ClassifierResult, TagClassifier};
use async_trait::async_trait;

/// Maximum number of tags suggested for a single text.
const MAX_TAGS: usize = 5;

/// Longest accepted input in characters.
const MAX_INPUT_CHARS: usize = 20_000;

/// Keyword stems mapped to the tag they suggest.
const TAG_RULES: &[(&[&str], &str)] = &[
    (&["bug", "fix", "defect", "crash"], "bugfix"),
    (&["deploy", "release", "rollout", "ship"], "release"),
    (&["meeting", "sync", "call", "standup"], "meeting"),
    (&["doc", "readme", "write-up", "wiki"], "documentation"),
    (&["test", "qa", "regression"], "testing"),
    (&["customer", "client", "user feedback"], "customer"),
    (&["research", "investigat", "explor", "spike"], "research"),
    (&["refactor", "cleanup", "clean up", "tech debt"], "refactoring"),
    (&["security", "vulnerab", "password", "credential", "api key"], "security"),
    (&["design", "mockup", "wireframe"], "design"),
];

/// Phrases that suggest schedule risk, with the hint returned for them.
const RISK_RULES: &[(&[&str], &str)] = &[
    (
        &["blocked", "waiting on", "depends on", "dependency"],
        "Depends on other work; confirm the blocker is cleared before starting.",
    ),
    (
        &["urgent", "asap", "today", "immediately"],
        "Tight deadline; consider splitting the task or reserving a focus slot.",
    ),
    (
        &["migrate", "migration", "production", "database"],
        "Touches production data; plan a rollback before starting.",
    ),
];

/// Keyword-table classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Creates the classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn normalize(text: &str) -> ClassifierResult<String> {
    if text.chars().count() > MAX_INPUT_CHARS {
        return Err(ClassifierError::Rejected(format!(
            "input exceeds {MAX_INPUT_CHARS} characters"
        )));
    }
    Ok(text.to_lowercase())
}

fn mentions_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[async_trait]
impl TagClassifier for KeywordClassifier {
    async fn suggest_tags(&self, text: &str) -> ClassifierResult<Vec<String>> {
        let normalized = normalize(text)?;
        Ok(TAG_RULES
            .iter()
            .filter(|(needles, _)| mentions_any(&normalized, needles))
            .map(|(_, tag)| (*tag).to_owned())
            .take(MAX_TAGS)
            .collect())
    }

    async fn assess_risk(&self, text: &str) -> ClassifierResult<Option<String>> {
        let normalized = normalize(text)?;
        Ok(RISK_RULES
            .iter()
            .find(|(needles, _)| mentions_any(&normalized, needles))
            .map(|(_, hint)| (*hint).to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordClassifier;
    use crate::classifier::ports::{ClassifierError, TagClassifier};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn suggests_tags_in_rule_order() {
        let tags = KeywordClassifier::new()
            .suggest_tags("Fixed the login crash and wrote a README section")
            .await
            .expect("classification should succeed");

        assert_eq!(tags, vec!["bugfix".to_owned(), "documentation".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn suggests_nothing_for_unrelated_text() {
        let tags = KeywordClassifier::new()
            .suggest_tags("Watered the office plants")
            .await
            .expect("classification should succeed");

        assert!(tags.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn caps_the_number_of_tags() {
        let tags = KeywordClassifier::new()
            .suggest_tags("bug release meeting doc test customer research refactor")
            .await
            .expect("classification should succeed");

        assert_eq!(tags.len(), 5);
    }

    #[rstest]
    #[case("Blocked until the vendor replies", true)]
    #[case("Migrate the production database", true)]
    #[case("Tidy the backlog", false)]
    #[tokio::test]
    async fn flags_risky_descriptions(#[case] text: &str, #[case] risky: bool) {
        let hint = KeywordClassifier::new()
            .assess_risk(text)
            .await
            .expect("risk assessment should succeed");

        assert_eq!(hint.is_some(), risky);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_oversized_input() {
        let text = "a".repeat(20_001);

        let result = KeywordClassifier::new().suggest_tags(&text).await;

        assert!(matches!(result, Err(ClassifierError::Rejected(_))));
    }
}
