//! Classification port used by focus debriefs and task creation.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Text classification contract.
#[async_trait]
pub trait TagClassifier: Send + Sync {
    /// Suggests short tags describing `text`.
    async fn suggest_tags(&self, text: &str) -> ClassifierResult<Vec<String>>;

    /// Returns a one-line risk hint for `text`, if anything looks risky.
    async fn assess_risk(&self, text: &str) -> ClassifierResult<Option<String>>;
}

/// Errors returned by classifier adapters.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// The classification service cannot be reached.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// The service refused the input.
    #[error("classifier rejected input: {0}")]
    Rejected(String),

    /// Generic runtime failure.
    #[error("classifier runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClassifierError {
    /// Wraps a runtime error from the adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
