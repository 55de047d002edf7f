//! Service layer for task creation, revision and status transitions.

use crate::directory::domain::UserId;
use crate::task::{
    domain::{ParseTaskValueError, Submission, Task, TaskDetails, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner_id: UserId,
    details: TaskDetails,
}

impl CreateTaskRequest {
    /// Creates a request for a task owned by `owner_id`.
    #[must_use]
    pub const fn new(owner_id: UserId, details: TaskDetails) -> Self {
        Self { owner_id, details }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the requested details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }
}

/// Request payload for a status transition expressed as a raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The requested status string is not a known status.
    #[error(transparent)]
    InvalidState(#[from] ParseTaskValueError),
    /// The task is referenced by a knowledge entry and cannot be deleted.
    #[error("task {0} is linked to the knowledge base and cannot be deleted")]
    LinkedToKnowledge(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let task = Task::new(request.owner_id, request.details, &*self.clock);
        self.store(task).await
    }

    /// Persists an already constructed task, such as a routine instance.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn store(&self, task: Task) -> TaskLifecycleResult<Task> {
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            budget = %task.budget(),
            "created task"
        );
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] wrapped in
    /// [`TaskLifecycleError::Repository`] when the task does not exist.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        debug!(task_id = %task_id, "loading task");
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        Ok(task)
    }

    /// Lists all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list().await?)
    }

    /// Lists tasks the user owns, is assigned to or collaborates on.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_involving(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_involving(user_id).await?)
    }

    /// Replaces a task's editable details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing or no longer
    /// editable.
    pub async fn revise(&self, task_id: TaskId, details: TaskDetails) -> TaskLifecycleResult<Task> {
        self.mutate(task_id, |task, clock| task.revise(details, clock))
            .await
    }

    /// Moves a task forward to the status named by the request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] for unknown status
    /// strings and [`TaskLifecycleError::Domain`] for forbidden transitions.
    pub async fn transition_task(
        &self,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(request.target_status.as_str())?;
        self.transition(request.task_id, target).await
    }

    /// Moves a task forward to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for forbidden transitions.
    pub async fn transition(&self, task_id: TaskId, target: TaskStatus) -> TaskLifecycleResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| task.transition_to(target, clock))
            .await?;
        info!(task_id = %task_id, status = target.as_str(), "task transitioned");
        Ok(task)
    }

    /// Moves a `todo` task to `doing`, leaving `doing` tasks unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is not open.
    pub async fn begin_work(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.mutate(task_id, |task, clock| task.begin_work(clock))
            .await
    }

    /// Hands work in for review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `doing`.
    pub async fn submit(&self, task_id: TaskId, submission: Submission) -> TaskLifecycleResult<Task> {
        self.mutate(task_id, |task, clock| task.submit(submission, clock))
            .await
    }

    /// Approves submitted work, completing the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `submitted`.
    pub async fn approve(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.find(task_id).await?;
        if task.status() != TaskStatus::Submitted {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id,
                from: task.status(),
                to: TaskStatus::Done,
            }
            .into());
        }
        self.transition(task_id, TaskStatus::Done).await
    }

    /// Sends submitted work back to `doing`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `submitted`.
    pub async fn reject(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| task.reject(clock))
            .await?;
        info!(task_id = %task_id, "submission rejected");
        Ok(task)
    }

    /// Reopens a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `done`.
    pub async fn reopen(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| task.reopen(clock))
            .await?;
        info!(task_id = %task_id, "task reopened");
        Ok(task)
    }

    /// Archives a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `todo` or
    /// `done`.
    pub async fn archive(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(task_id, TaskStatus::Archived).await
    }

    /// Completes a task with a submission and merged tags.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] unless the task is `doing` or
    /// `submitted`.
    pub async fn complete(
        &self,
        task_id: TaskId,
        submission: Submission,
        tags: Vec<String>,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .mutate(task_id, |task, clock| task.complete(submission, tags, clock))
            .await?;
        info!(task_id = %task_id, tags = task.tags().len(), "task completed");
        Ok(task)
    }

    /// Persists an arbitrary mutation of a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, the mutation
    /// fails or the update cannot be persisted.
    pub async fn mutate<F>(&self, task_id: TaskId, mutation: F) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut task = self.find(task_id).await?;
        mutation(&mut task, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task that is not linked to the knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::LinkedToKnowledge`] for linked tasks.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.find(task_id).await?;
        if task.knowledge_entry_id().is_some() {
            return Err(TaskLifecycleError::LinkedToKnowledge(task_id));
        }
        self.repository.remove(task_id).await?;
        info!(task_id = %task_id, "task deleted");
        Ok(())
    }
}
