//! Service tying focus timers to allocations and finalizing debriefs.

use crate::allocation::{
    domain::{AllocationId, TaskAllocation},
    ports::{AllocationRepository, AllocationRepositoryError},
    services::{AllocationEngine, AllocationError},
};
use crate::classifier::ports::TagClassifier;
use crate::directory::domain::UserId;
use crate::focus::domain::{
    DEFAULT_MIN_TEXT_CHARS, DebriefRequest, FocusError, FocusTimer, TimerState,
};
use crate::knowledge::{
    domain::{KnowledgeEntry, WriteUp},
    ports::KnowledgeRepository,
    services::{KnowledgeError, KnowledgeService},
};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus, TimeBudget},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Running allocations a single user may hold at once.
pub const DEFAULT_MAX_RUNNING_PER_USER: usize = 2;

/// Snapshot of an in-flight focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusStatus {
    /// Allocation backing the session.
    pub allocation_id: AllocationId,
    /// Task being worked on.
    pub task_id: TaskId,
    /// Timer state.
    pub state: TimerState,
    /// Running seconds so far.
    pub elapsed_seconds: u64,
    /// Task budget in seconds.
    pub budget_seconds: u64,
    /// Whether the elapsed time exceeds the budget.
    pub overrun: bool,
}

/// Records produced by a completed debrief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusOutcome {
    /// Task after completion.
    pub task: Task,
    /// Allocation after finalization.
    pub allocation: TaskAllocation,
    /// Knowledge entry, when the debrief opted in.
    pub knowledge_entry: Option<KnowledgeEntry>,
}

/// Service-level errors for focus sessions.
#[derive(Debug, Error)]
pub enum FocusSessionError {
    /// Timer or debrief validation failed.
    #[error(transparent)]
    Focus(#[from] FocusError),
    /// Task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// Allocation operation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    /// Knowledge write-up failed.
    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
    /// The user already has the maximum number of running allocations.
    #[error("user {user_id} already has {limit} running allocations")]
    TooManyRunning {
        /// User starting focus.
        user_id: UserId,
        /// Configured limit.
        limit: usize,
    },
    /// The task already has a live focus session.
    #[error("task {task_id} is already in focus under allocation {allocation_id}")]
    TaskInFocus {
        /// Task being focused on.
        task_id: TaskId,
        /// Allocation backing the live session.
        allocation_id: AllocationId,
    },
    /// No in-memory session exists for the allocation.
    #[error("no focus session for allocation {0}")]
    SessionNotFound(AllocationId),
    /// The session ran past the grace period and needs a debrief.
    #[error("allocation {allocation_id} ran for {elapsed_seconds}s; finish it with a debrief")]
    DebriefRequired {
        /// Allocation backing the session.
        allocation_id: AllocationId,
        /// Running seconds so far.
        elapsed_seconds: u64,
    },
    /// The session table lock was poisoned.
    #[error("focus session state unavailable: {0}")]
    State(String),
}

/// Result type for focus session operations.
pub type FocusSessionResult<T> = Result<T, FocusSessionError>;

#[derive(Debug, Clone)]
struct FocusSession {
    task_id: TaskId,
    budget: TimeBudget,
    timer: FocusTimer,
}

impl FocusSession {
    fn status(&self, allocation_id: AllocationId, now: DateTime<Utc>) -> FocusStatus {
        let elapsed_seconds = self.timer.elapsed(now);
        FocusStatus {
            allocation_id,
            task_id: self.task_id,
            state: self.timer.state(),
            elapsed_seconds,
            budget_seconds: self.budget.as_seconds(),
            overrun: self.budget.is_overrun(elapsed_seconds),
        }
    }
}

type SessionTable = Arc<RwLock<HashMap<AllocationId, FocusSession>>>;

/// Focus session orchestration service.
///
/// Timer state lives in process memory; allocations, tasks and knowledge
/// entries are persisted through their services.
pub struct FocusSessionService<T, A, K, X, C>
where
    T: TaskRepository,
    A: AllocationRepository,
    K: KnowledgeRepository,
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    tasks: TaskLifecycleService<T, C>,
    allocations: AllocationEngine<A, C>,
    knowledge: KnowledgeService<K, C>,
    classifier: Arc<X>,
    clock: Arc<C>,
    sessions: SessionTable,
    max_running_per_user: usize,
    min_text_chars: usize,
}

impl<T, A, K, X, C> Clone for FocusSessionService<T, A, K, X, C>
where
    T: TaskRepository,
    A: AllocationRepository,
    K: KnowledgeRepository,
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            allocations: self.allocations.clone(),
            knowledge: self.knowledge.clone(),
            classifier: Arc::clone(&self.classifier),
            clock: Arc::clone(&self.clock),
            sessions: Arc::clone(&self.sessions),
            max_running_per_user: self.max_running_per_user,
            min_text_chars: self.min_text_chars,
        }
    }
}

impl<T, A, K, X, C> FocusSessionService<T, A, K, X, C>
where
    T: TaskRepository,
    A: AllocationRepository,
    K: KnowledgeRepository,
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    /// Creates a focus service over the task, allocation and knowledge
    /// services.
    #[must_use]
    pub fn new(
        tasks: TaskLifecycleService<T, C>,
        allocations: AllocationEngine<A, C>,
        knowledge: KnowledgeService<K, C>,
        classifier: Arc<X>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            allocations,
            knowledge,
            classifier,
            clock,
            sessions: Arc::default(),
            max_running_per_user: DEFAULT_MAX_RUNNING_PER_USER,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }

    /// Overrides the running allocation limit per user.
    #[must_use]
    pub const fn with_max_running_per_user(mut self, limit: usize) -> Self {
        self.max_running_per_user = limit;
        self
    }

    /// Overrides the minimum debrief text length.
    #[must_use]
    pub const fn with_min_text_chars(mut self, min_chars: usize) -> Self {
        self.min_text_chars = min_chars;
        self
    }

    /// Starts focusing on a task with a fresh running allocation.
    ///
    /// A `todo` task moves to `doing`.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::TaskInFocus`] when the task already has
    /// a live session, [`FocusSessionError::TooManyRunning`] when the user
    /// is at the limit and [`FocusSessionError::Task`] when the task is not
    /// open.
    pub async fn start_focus(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> FocusSessionResult<TaskAllocation> {
        self.ensure_not_in_focus(task_id)?;
        self.ensure_capacity(user_id).await?;
        let task = self.tasks.begin_work(task_id).await?;
        let planned_minutes = u32::try_from(task.budget().as_minutes()).unwrap_or(u32::MAX);
        let allocation = self
            .allocations
            .start_now(task_id, user_id, planned_minutes)
            .await?;
        self.open_session(&allocation, task.budget())?;
        info!(
            allocation_id = %allocation.id(),
            task_id = %task_id,
            user_id = %user_id,
            budget = %task.budget(),
            "focus started"
        );
        Ok(allocation)
    }

    /// Starts focusing on a previously planned allocation.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::TaskInFocus`] when the task already has
    /// a live session, [`FocusSessionError::TooManyRunning`] when the user
    /// is at the limit and [`FocusSessionError::Allocation`] unless the slot
    /// is planned.
    pub async fn start_planned(
        &self,
        allocation_id: AllocationId,
    ) -> FocusSessionResult<TaskAllocation> {
        let planned = self.allocations.find(allocation_id).await?;
        self.ensure_not_in_focus(planned.task_id())?;
        self.ensure_capacity(planned.user_id()).await?;
        let task = self.tasks.begin_work(planned.task_id()).await?;
        let allocation = self.allocations.start(allocation_id).await?;
        self.open_session(&allocation, task.budget())?;
        info!(
            allocation_id = %allocation_id,
            task_id = %allocation.task_id(),
            "focus started from plan"
        );
        Ok(allocation)
    }

    /// Pauses a session, banking its running time on the allocation.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::SessionNotFound`] for unknown sessions
    /// and [`FocusSessionError::Focus`] unless the timer is running.
    pub async fn pause(&self, allocation_id: AllocationId) -> FocusSessionResult<FocusStatus> {
        let now = self.clock.utc();
        let status = self.with_session(allocation_id, |session| {
            session.timer.pause(now)?;
            Ok(session.status(allocation_id, now))
        })?;
        self.allocations
            .pause(allocation_id, status.elapsed_seconds)
            .await?;
        info!(
            allocation_id = %allocation_id,
            elapsed_seconds = status.elapsed_seconds,
            "focus paused"
        );
        Ok(status)
    }

    /// Resumes a paused session.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::SessionNotFound`] for unknown sessions,
    /// [`FocusSessionError::TooManyRunning`] when the user already holds the
    /// maximum number of running allocations and [`FocusSessionError::Focus`]
    /// unless the timer is paused.
    pub async fn resume(&self, allocation_id: AllocationId) -> FocusSessionResult<FocusStatus> {
        if self.status(allocation_id)?.state == TimerState::Paused {
            let paused = self.allocations.find(allocation_id).await?;
            self.ensure_capacity(paused.user_id()).await?;
        }
        let now = self.clock.utc();
        let status = self.with_session(allocation_id, |session| {
            session.timer.resume(now)?;
            Ok(session.status(allocation_id, now))
        })?;
        self.allocations.resume(allocation_id).await?;
        info!(allocation_id = %allocation_id, "focus resumed");
        Ok(status)
    }

    /// Returns the current state of a session.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::SessionNotFound`] for unknown sessions.
    pub fn status(&self, allocation_id: AllocationId) -> FocusSessionResult<FocusStatus> {
        let now = self.clock.utc();
        let sessions = self
            .sessions
            .read()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        sessions
            .get(&allocation_id)
            .map(|session| session.status(allocation_id, now))
            .ok_or(FocusSessionError::SessionNotFound(allocation_id))
    }

    /// Returns whether an in-memory session backs the allocation.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::State`] when the session table is
    /// unavailable.
    pub fn has_session(&self, allocation_id: AllocationId) -> FocusSessionResult<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        Ok(sessions.contains_key(&allocation_id))
    }

    /// Lists the in-flight sessions.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::State`] when the session table is
    /// unavailable.
    pub fn active_sessions(&self) -> FocusSessionResult<Vec<FocusStatus>> {
        let now = self.clock.utc();
        let sessions = self
            .sessions
            .read()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        Ok(sessions
            .iter()
            .map(|(allocation_id, session)| session.status(*allocation_id, now))
            .collect())
    }

    /// Abandons a session that has not passed the grace period, removing its
    /// allocation.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::DebriefRequired`] once the session has
    /// run for the grace period or longer.
    pub async fn cancel(&self, allocation_id: AllocationId) -> FocusSessionResult<()> {
        let status = self.status(allocation_id)?;
        let grace = u64::try_from(self.allocations.removal_grace().num_seconds()).unwrap_or(0);
        if status.elapsed_seconds >= grace {
            return Err(FocusSessionError::DebriefRequired {
                allocation_id,
                elapsed_seconds: status.elapsed_seconds,
            });
        }
        if status.state == TimerState::Running {
            self.allocations
                .pause(allocation_id, status.elapsed_seconds)
                .await?;
        }
        self.allocations.remove(allocation_id).await?;
        self.close_session(allocation_id)?;
        info!(allocation_id = %allocation_id, "focus cancelled");
        Ok(())
    }

    /// Completes a session with a debrief.
    ///
    /// The classifier is asked for tags; a failure leaves the suggested tags
    /// empty and the debrief proceeds. The allocation moves to `done` or
    /// `overrun` first, then the task moves to `done` and a knowledge entry
    /// is recorded when requested. A task that is already `done` keeps its
    /// submission and only the allocation is closed.
    ///
    /// # Errors
    ///
    /// Returns [`FocusSessionError::Focus`] when the debrief is invalid,
    /// [`FocusSessionError::Task`] when the task can no longer be completed
    /// and [`FocusSessionError::SessionNotFound`] for unknown sessions.
    pub async fn finalize(&self, debrief: DebriefRequest) -> FocusSessionResult<FocusOutcome> {
        let allocation_id = debrief.allocation_id();
        let status = self.status(allocation_id)?;
        let submission = debrief.to_submission(status.overrun, self.min_text_chars)?;
        let started = self.tasks.find(status.task_id).await?;
        let already_done = started.status() == TaskStatus::Done;
        if !already_done && !started.status().can_transition_to(TaskStatus::Done) {
            return Err(TaskLifecycleError::from(TaskDomainError::InvalidStateTransition {
                task_id: started.id(),
                from: started.status(),
                to: TaskStatus::Done,
            })
            .into());
        }

        let allocation = self.finish_allocation(allocation_id, &status).await?;
        if already_done {
            self.close_session(allocation_id)?;
            info!(
                allocation_id = %allocation_id,
                task_id = %started.id(),
                elapsed_seconds = status.elapsed_seconds,
                "focus closed on a task that was already done"
            );
            return Ok(FocusOutcome {
                task: started,
                allocation,
                knowledge_entry: None,
            });
        }

        let suggested = self.suggest_tags(&started, debrief.reflection()).await;
        let completed = self
            .tasks
            .complete(started.id(), submission, suggested)
            .await?;

        let (task, knowledge_entry) = if debrief.saves_to_knowledge() {
            let entry = self
                .knowledge
                .record(WriteUp {
                    task_id: completed.id(),
                    author_id: allocation.user_id(),
                    title: completed.title().to_owned(),
                    summary: debrief.reflection().trim().to_owned(),
                    overrun_reason: completed
                        .submission()
                        .and_then(|submission| submission.overrun_reason())
                        .map(str::to_owned),
                    tags: completed.tags().to_vec(),
                    actual_seconds: allocation.accumulated_seconds(),
                })
                .await?;
            let entry_id = entry.id();
            let linked = self
                .tasks
                .mutate(completed.id(), move |record, clock| {
                    record.link_knowledge(entry_id, clock);
                    Ok(())
                })
                .await?;
            (linked, Some(entry))
        } else {
            (completed, None)
        };

        self.close_session(allocation_id)?;
        info!(
            allocation_id = %allocation_id,
            task_id = %task.id(),
            elapsed_seconds = status.elapsed_seconds,
            overrun = status.overrun,
            saved_to_knowledge = knowledge_entry.is_some(),
            "focus debrief completed"
        );
        Ok(FocusOutcome {
            task,
            allocation,
            knowledge_entry,
        })
    }

    async fn finish_allocation(
        &self,
        allocation_id: AllocationId,
        status: &FocusStatus,
    ) -> FocusSessionResult<TaskAllocation> {
        match self
            .allocations
            .finish(allocation_id, status.elapsed_seconds, status.overrun)
            .await
        {
            Ok(allocation) => Ok(allocation),
            Err(err @ AllocationError::Repository(AllocationRepositoryError::NotFound(_))) => {
                self.close_session(allocation_id)?;
                warn!(allocation_id = %allocation_id, "allocation vanished; focus session dropped");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn ensure_not_in_focus(&self, task_id: TaskId) -> FocusSessionResult<()> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        sessions
            .iter()
            .find(|(_, session)| session.task_id == task_id)
            .map_or(Ok(()), |(allocation_id, _)| {
                Err(FocusSessionError::TaskInFocus {
                    task_id,
                    allocation_id: *allocation_id,
                })
            })
    }

    async fn suggest_tags(&self, task: &Task, reflection: &str) -> Vec<String> {
        let text = format!("{}\n{}", task.title(), reflection);
        self.classifier
            .suggest_tags(&text)
            .await
            .unwrap_or_else(|err| {
                warn!(
                    task_id = %task.id(),
                    error = %err,
                    "tag suggestion failed; continuing without tags"
                );
                Vec::new()
            })
    }

    async fn ensure_capacity(&self, user_id: UserId) -> FocusSessionResult<()> {
        let running = self.allocations.running_count(user_id).await?;
        if running >= self.max_running_per_user {
            warn!(user_id = %user_id, running, "running allocation limit reached");
            return Err(FocusSessionError::TooManyRunning {
                user_id,
                limit: self.max_running_per_user,
            });
        }
        Ok(())
    }

    fn open_session(
        &self,
        allocation: &TaskAllocation,
        budget: TimeBudget,
    ) -> FocusSessionResult<()> {
        let mut timer = FocusTimer::new();
        timer.start(allocation.actual_start_at().unwrap_or_else(|| self.clock.utc()));
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        sessions.insert(
            allocation.id(),
            FocusSession {
                task_id: allocation.task_id(),
                budget,
                timer,
            },
        );
        Ok(())
    }

    fn close_session(&self, allocation_id: AllocationId) -> FocusSessionResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        sessions.remove(&allocation_id);
        Ok(())
    }

    fn with_session<R>(
        &self,
        allocation_id: AllocationId,
        apply: impl FnOnce(&mut FocusSession) -> Result<R, FocusError>,
    ) -> FocusSessionResult<R> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| FocusSessionError::State(err.to_string()))?;
        let session = sessions
            .get_mut(&allocation_id)
            .ok_or(FocusSessionError::SessionNotFound(allocation_id))?;
        Ok(apply(session)?)
    }
}
