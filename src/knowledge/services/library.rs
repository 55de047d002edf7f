//! Service layer for recording and searching knowledge entries.

use super::writeup::render_write_up;
use crate::knowledge::{
    domain::{KnowledgeEntry, KnowledgeEntryId, WriteUp},
    ports::{KnowledgeRepository, KnowledgeRepositoryError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for knowledge base operations.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] KnowledgeRepositoryError),
    /// The write-up template could not be rendered.
    #[error("failed to render write-up for task {task_id}: {reason}")]
    Render {
        /// Task the write-up describes.
        task_id: TaskId,
        /// Renderer failure description.
        reason: String,
    },
    /// The entry does not exist.
    #[error("knowledge entry not found: {0}")]
    NotFound(KnowledgeEntryId),
}

/// Result type for knowledge service operations.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Knowledge base orchestration service.
pub struct KnowledgeService<R, C>
where
    R: KnowledgeRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for KnowledgeService<R, C>
where
    R: KnowledgeRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> KnowledgeService<R, C>
where
    R: KnowledgeRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new knowledge service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Renders and stores a write-up.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Render`] when the template fails and
    /// [`KnowledgeError::Repository`] when persistence fails.
    pub async fn record(&self, write_up: WriteUp) -> KnowledgeResult<KnowledgeEntry> {
        let body = render_write_up(&write_up).map_err(|error| KnowledgeError::Render {
            task_id: write_up.task_id,
            reason: error.to_string(),
        })?;
        let entry = KnowledgeEntry::new(write_up, body, &*self.clock);
        self.repository.store(&entry).await?;
        info!(entry_id = %entry.id(), task_id = %entry.task_id(), "recorded knowledge entry");
        Ok(entry)
    }

    /// Returns an entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::NotFound`] for unknown entries.
    pub async fn entry(&self, id: KnowledgeEntryId) -> KnowledgeResult<KnowledgeEntry> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(KnowledgeError::NotFound(id))
    }

    /// Returns entries written up from a task.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Repository`] when the lookup fails.
    pub async fn entries_for_task(&self, task_id: TaskId) -> KnowledgeResult<Vec<KnowledgeEntry>> {
        Ok(self.repository.find_by_task(task_id).await?)
    }

    /// Returns all entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Repository`] when the lookup fails.
    pub async fn entries(&self) -> KnowledgeResult<Vec<KnowledgeEntry>> {
        let mut entries = self.repository.list().await?;
        entries.reverse();
        Ok(entries)
    }

    /// Returns entries tagged with `tag`, ignoring ASCII case, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Repository`] when the lookup fails.
    pub async fn search_by_tag(&self, tag: &str) -> KnowledgeResult<Vec<KnowledgeEntry>> {
        let mut entries = self.entries().await?;
        entries.retain(|entry| entry.has_tag(tag));
        Ok(entries)
    }
}
