//! Service layer expanding routine templates into concrete tasks.

use crate::directory::domain::UserId;
use crate::routine::{
    domain::{RoutineDefinition, RoutineDomainError, RoutineId, RoutineStatus, RoutineTemplate},
    ports::{RoutineRepository, RoutineRepositoryError},
};
use crate::task::{
    domain::{Task, TaskDetails, TaskDomainError},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Result of deploying a routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Routine state after the deployment was recorded.
    pub routine: RoutineTemplate,
    /// Tasks spawned by the deployment.
    pub tasks: Vec<Task>,
}

/// Service-level errors for routine operations.
#[derive(Debug, Error)]
pub enum RoutineError {
    /// Routine validation failed.
    #[error(transparent)]
    Domain(#[from] RoutineDomainError),
    /// Spawned task validation failed.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// Routine repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoutineRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for routine service operations.
pub type RoutineResult<T> = Result<T, RoutineError>;

/// Routine lifecycle and deployment service.
pub struct RoutineInstantiator<R, T, C>
where
    R: RoutineRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    routines: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> Clone for RoutineInstantiator<R, T, C>
where
    R: RoutineRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            routines: Arc::clone(&self.routines),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, C> RoutineInstantiator<R, T, C>
where
    R: RoutineRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new routine service.
    #[must_use]
    pub const fn new(routines: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            routines,
            tasks,
            clock,
        }
    }

    /// Saves a new draft routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Repository`] when persistence fails.
    pub async fn create_draft(
        &self,
        owner_id: UserId,
        definition: RoutineDefinition,
    ) -> RoutineResult<RoutineTemplate> {
        let routine = RoutineTemplate::new(owner_id, definition, &*self.clock);
        self.routines.store(&routine).await?;
        info!(routine_id = %routine.id(), "saved routine draft");
        Ok(routine)
    }

    /// Returns a routine by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineRepositoryError::NotFound`] for unknown routines.
    pub async fn find(&self, routine_id: RoutineId) -> RoutineResult<RoutineTemplate> {
        let routine = self
            .routines
            .find_by_id(routine_id)
            .await?
            .ok_or(RoutineRepositoryError::NotFound(routine_id))?;
        Ok(routine)
    }

    /// Lists all routines.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Repository`] when the lookup fails.
    pub async fn list(&self) -> RoutineResult<Vec<RoutineTemplate>> {
        Ok(self.routines.list().await?)
    }

    /// Returns active routines whose recurrence fires on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Repository`] when the lookup fails.
    pub async fn due_on(&self, date: NaiveDate) -> RoutineResult<Vec<RoutineTemplate>> {
        let mut routines = self.routines.list().await?;
        routines.retain(|routine| {
            routine.status() == RoutineStatus::Active
                && routine.definition().recurrence.fires_on(date)
        });
        Ok(routines)
    }

    /// Replaces a routine's definition.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] when the routine has completed or an
    /// active routine would lose its title or assignees.
    pub async fn revise(
        &self,
        routine_id: RoutineId,
        definition: RoutineDefinition,
    ) -> RoutineResult<RoutineTemplate> {
        self.mutate(routine_id, |routine, clock| routine.revise(definition, clock))
            .await
    }

    /// Activates a draft routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] when the draft lacks a title or
    /// assignees.
    pub async fn activate(&self, routine_id: RoutineId) -> RoutineResult<RoutineTemplate> {
        let routine = self
            .mutate(routine_id, |routine, clock| routine.activate(clock))
            .await?;
        info!(routine_id = %routine_id, "routine activated");
        Ok(routine)
    }

    /// Toggles a routine between active and frozen.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] for drafts and completed routines.
    pub async fn toggle_frozen(&self, routine_id: RoutineId) -> RoutineResult<RoutineTemplate> {
        let routine = self
            .mutate(routine_id, |routine, clock| routine.toggle_frozen(clock))
            .await?;
        info!(
            routine_id = %routine_id,
            status = routine.status().as_str(),
            "routine recurrence toggled"
        );
        Ok(routine)
    }

    /// Marks an active routine as completed.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] unless the routine is active.
    pub async fn complete(&self, routine_id: RoutineId) -> RoutineResult<RoutineTemplate> {
        let routine = self
            .mutate(routine_id, |routine, clock| routine.complete(clock))
            .await?;
        info!(routine_id = %routine_id, "routine completed");
        Ok(routine)
    }

    /// Overrides the next rotating assignee.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] when the index is out of range.
    pub async fn set_rotation_index(
        &self,
        routine_id: RoutineId,
        index: usize,
    ) -> RoutineResult<RoutineTemplate> {
        self.mutate(routine_id, |routine, clock| {
            routine.set_rotation_index(index, clock)
        })
        .await
    }

    /// Deploys an active routine for `on_date`, spawning one task per
    /// receiving assignee.
    ///
    /// Static routines spawn a task for every assignee; rotating routines
    /// spawn one task and advance the rotation.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineError::Domain`] when the routine is not active and
    /// repository errors when persistence fails.
    pub async fn deploy(
        &self,
        routine_id: RoutineId,
        on_date: NaiveDate,
    ) -> RoutineResult<Deployment> {
        let mut routine = self.find(routine_id).await?;
        let assignees = routine.record_deployment(&*self.clock)?;
        let due_at = end_of_day(on_date);

        let mut spawned = Vec::with_capacity(assignees.len());
        for assignee in assignees {
            let details = instance_details(routine.definition(), assignee, due_at)?;
            let task = Task::new(routine.owner_id(), details, &*self.clock).spawned_by(routine_id);
            self.tasks.store(&task).await?;
            spawned.push(task);
        }
        self.routines.update(&routine).await?;

        info!(
            routine_id = %routine_id,
            date = %on_date,
            tasks = spawned.len(),
            next_rotation_index = routine.current_rotation_index(),
            "routine deployed"
        );
        Ok(Deployment {
            routine,
            tasks: spawned,
        })
    }

    async fn mutate<F>(&self, routine_id: RoutineId, mutation: F) -> RoutineResult<RoutineTemplate>
    where
        F: FnOnce(&mut RoutineTemplate, &C) -> Result<(), RoutineDomainError> + Send,
    {
        let mut routine = self.find(routine_id).await?;
        mutation(&mut routine, &*self.clock)?;
        self.routines.update(&routine).await?;
        Ok(routine)
    }
}

fn instance_details(
    definition: &RoutineDefinition,
    assignee: UserId,
    due_at: DateTime<Utc>,
) -> Result<TaskDetails, TaskDomainError> {
    let mut details = TaskDetails::new(definition.title.clone(), definition.budget)?
        .with_assignee(assignee)
        .with_due_at(due_at);
    if let Some(description) = &definition.description {
        details = details.with_description(description.clone());
    }
    if let Some(goal) = definition.goal {
        details = details.with_goal(goal);
    }
    if let Some(project_id) = definition.project_id {
        details = details.with_project(project_id);
    }
    Ok(details)
}

/// Last second of `date` in UTC.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(last_second).and_utc()
}
