//! In-memory repository for knowledge entries.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::knowledge::{
    domain::{KnowledgeEntry, KnowledgeEntryId},
    ports::{KnowledgeRepository, KnowledgeRepositoryError, KnowledgeRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory knowledge repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeRepository {
    entries: Arc<RwLock<Vec<KnowledgeEntry>>>,
}

impl InMemoryKnowledgeRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeRepository for InMemoryKnowledgeRepository {
    async fn store(&self, entry: &KnowledgeEntry) -> KnowledgeRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            KnowledgeRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(KnowledgeRepositoryError::DuplicateEntry(entry.id()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: KnowledgeEntryId,
    ) -> KnowledgeRepositoryResult<Option<KnowledgeEntry>> {
        let entries = self.entries.read().map_err(|err| {
            KnowledgeRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.iter().find(|entry| entry.id() == id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> KnowledgeRepositoryResult<Vec<KnowledgeEntry>> {
        let entries = self.entries.read().map_err(|err| {
            KnowledgeRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> KnowledgeRepositoryResult<Vec<KnowledgeEntry>> {
        let entries = self.entries.read().map_err(|err| {
            KnowledgeRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.clone())
    }
}
