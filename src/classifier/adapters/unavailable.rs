//! Classifier used when no classification service is configured.

use crate::classifier::ports::{ClassifierError, ClassifierResult, TagClassifier};
use async_trait::async_trait;

/// Classifier that fails every call, for offline operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClassifier;

#[async_trait]
impl TagClassifier for UnavailableClassifier {
    async fn suggest_tags(&self, _text: &str) -> ClassifierResult<Vec<String>> {
        Err(ClassifierError::Unavailable(
            "no classification service configured".to_owned(),
        ))
    }

    async fn assess_risk(&self, _text: &str) -> ClassifierResult<Option<String>> {
        Err(ClassifierError::Unavailable(
            "no classification service configured".to_owned(),
        ))
    }
}
