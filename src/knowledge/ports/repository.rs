//! Repository port for knowledge entries.

use crate::knowledge::domain::{KnowledgeEntry, KnowledgeEntryId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for knowledge repository operations.
pub type KnowledgeRepositoryResult<T> = Result<T, KnowledgeRepositoryError>;

/// Knowledge entry persistence contract.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeRepositoryError::DuplicateEntry`] when the entry ID
    /// already exists.
    async fn store(&self, entry: &KnowledgeEntry) -> KnowledgeRepositoryResult<()>;

    /// Finds an entry by identifier.
    async fn find_by_id(
        &self,
        id: KnowledgeEntryId,
    ) -> KnowledgeRepositoryResult<Option<KnowledgeEntry>>;

    /// Returns entries written up from the given task.
    async fn find_by_task(&self, task_id: TaskId) -> KnowledgeRepositoryResult<Vec<KnowledgeEntry>>;

    /// Returns all entries in creation order.
    async fn list(&self) -> KnowledgeRepositoryResult<Vec<KnowledgeEntry>>;
}

/// Errors returned by knowledge repository implementations.
#[derive(Debug, Clone, Error)]
pub enum KnowledgeRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate knowledge entry: {0}")]
    DuplicateEntry(KnowledgeEntryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl KnowledgeRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
