//! In-memory repository for routine templates.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::routine::{
    domain::{RoutineId, RoutineTemplate},
    ports::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult},
};

/// Thread-safe in-memory routine repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoutineRepository {
    routines: Arc<RwLock<Vec<RoutineTemplate>>>,
}

impl InMemoryRoutineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoutineRepository for InMemoryRoutineRepository {
    async fn store(&self, routine: &RoutineTemplate) -> RoutineRepositoryResult<()> {
        let mut routines = self.routines.write().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if routines.iter().any(|existing| existing.id() == routine.id()) {
            return Err(RoutineRepositoryError::DuplicateRoutine(routine.id()));
        }
        routines.push(routine.clone());
        Ok(())
    }

    async fn update(&self, routine: &RoutineTemplate) -> RoutineRepositoryResult<()> {
        let mut routines = self.routines.write().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let slot = routines
            .iter_mut()
            .find(|existing| existing.id() == routine.id())
            .ok_or(RoutineRepositoryError::NotFound(routine.id()))?;
        slot.clone_from(routine);
        Ok(())
    }

    async fn find_by_id(&self, id: RoutineId) -> RoutineRepositoryResult<Option<RoutineTemplate>> {
        let routines = self.routines.read().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(routines.iter().find(|routine| routine.id() == id).cloned())
    }

    async fn list(&self) -> RoutineRepositoryResult<Vec<RoutineTemplate>> {
        let routines = self.routines.read().map_err(|err| {
            RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(routines.clone())
    }
}
