//! Task aggregate root.

use super::{GoalCategory, Submission, TaskDomainError, TaskId, TaskStatus, TimeBudget};
use crate::directory::domain::{ProjectId, UserId};
use crate::knowledge::domain::KnowledgeEntryId;
use crate::routine::domain::RoutineId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Editable descriptive fields of a task.
///
/// Used both for creation and for later revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: Option<String>,
    budget: TimeBudget,
    goal: Option<GoalCategory>,
    due_at: Option<DateTime<Utc>>,
    project_id: Option<ProjectId>,
    assignee_id: Option<UserId>,
    collaborator_ids: Vec<UserId>,
    tags: Vec<String>,
}

impl TaskDetails {
    /// Creates details with the required title and budget.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>, budget: TimeBudget) -> Result<Self, TaskDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            budget,
            goal: None,
            due_at: None,
            project_id: None,
            assignee_id: None,
            collaborator_ids: Vec::new(),
            tags: Vec::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the goal category.
    #[must_use]
    pub const fn with_goal(mut self, goal: GoalCategory) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Places the task in a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets collaborating users.
    #[must_use]
    pub fn with_collaborators(mut self, collaborators: impl IntoIterator<Item = UserId>) -> Self {
        self.collaborator_ids = Vec::new();
        for collaborator in collaborators {
            if !self.collaborator_ids.contains(&collaborator) {
                self.collaborator_ids.push(collaborator);
            }
        }
        self
    }

    /// Sets the tag list, dropping blanks and duplicates.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Vec::new();
        merge_tags(&mut self.tags, tags);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the time budget.
    #[must_use]
    pub const fn budget(&self) -> TimeBudget {
        self.budget
    }

    /// Returns the goal category, if any.
    #[must_use]
    pub const fn goal(&self) -> Option<GoalCategory> {
        self.goal
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the referenced project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the collaborators.
    #[must_use]
    pub fn collaborator_ids(&self) -> &[UserId] {
        &self.collaborator_ids
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    details: TaskDetails,
    status: TaskStatus,
    submission: Option<Submission>,
    knowledge_entry_id: Option<KnowledgeEntryId>,
    routine_id: Option<RoutineId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(owner_id: UserId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner_id,
            details,
            status: TaskStatus::Todo,
            submission: None,
            knowledge_entry_id: None,
            routine_id: None,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Marks the task as spawned from a routine.
    #[must_use]
    pub const fn spawned_by(mut self, routine_id: RoutineId) -> Self {
        self.routine_id = Some(routine_id);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the editable details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.details.description.as_deref()
    }

    /// Returns the nominal time budget.
    #[must_use]
    pub const fn budget(&self) -> TimeBudget {
        self.details.budget
    }

    /// Returns the goal category, if any.
    #[must_use]
    pub const fn goal(&self) -> Option<GoalCategory> {
        self.details.goal
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.details.due_at
    }

    /// Returns the project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.details.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.details.assignee_id
    }

    /// Returns the collaborators.
    #[must_use]
    pub fn collaborator_ids(&self) -> &[UserId] {
        &self.details.collaborator_ids
    }

    /// Returns the user responsible for the work: the assignee, or the owner
    /// when unassigned.
    #[must_use]
    pub fn responsible_id(&self) -> UserId {
        self.details.assignee_id.unwrap_or(self.owner_id)
    }

    /// Returns whether `user_id` owns, is assigned to or collaborates on the
    /// task.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
            || self.details.assignee_id == Some(user_id)
            || self.details.collaborator_ids.contains(&user_id)
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.details.tags
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the submission, if any.
    #[must_use]
    pub const fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Returns the linked knowledge entry, if any.
    #[must_use]
    pub const fn knowledge_entry_id(&self) -> Option<KnowledgeEntryId> {
        self.knowledge_entry_id
    }

    /// Returns the routine that spawned this task, if any.
    #[must_use]
    pub const fn routine_id(&self) -> Option<RoutineId> {
        self.routine_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the editable details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotEditable`] unless the task is open.
    pub fn revise(&mut self, details: TaskDetails, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !self.status.is_open() {
            return Err(TaskDomainError::NotEditable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.details = details;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task forward to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the move is
    /// not a permitted forward transition.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(target)?;
        self.status = target;
        if target == TaskStatus::Done {
            self.completed_at = Some(clock.utc());
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves a `todo` task to `doing`; other states are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// submitted, done or archived.
    pub fn begin_work(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Todo => self.transition_to(TaskStatus::Doing, clock),
            TaskStatus::Doing => Ok(()),
            other => Err(self.invalid_transition(other, TaskStatus::Doing)),
        }
    }

    /// Hands the work in for review with a submission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is `doing`.
    pub fn submit(
        &mut self,
        submission: Submission,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Submitted, clock)?;
        self.submission = Some(submission);
        Ok(())
    }

    /// Completes the task with a submission and merges `tags` into the tag
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is `doing` or `submitted`.
    pub fn complete(
        &mut self,
        submission: Submission,
        tags: impl IntoIterator<Item = String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Done, clock)?;
        self.submission = Some(submission);
        merge_tags(&mut self.details.tags, tags);
        Ok(())
    }

    /// Sends submitted work back to `doing`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is `submitted`.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Submitted {
            return Err(self.invalid_transition(self.status, TaskStatus::Doing));
        }
        self.status = TaskStatus::Doing;
        self.submission = None;
        self.touch(clock);
        Ok(())
    }

    /// Reopens a completed task for more work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task
    /// is `done`.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Done {
            return Err(self.invalid_transition(self.status, TaskStatus::Doing));
        }
        self.status = TaskStatus::Doing;
        self.completed_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Links the task to a knowledge base write-up.
    pub fn link_knowledge(&mut self, entry_id: KnowledgeEntryId, clock: &impl Clock) {
        self.knowledge_entry_id = Some(entry_id);
        self.touch(clock);
    }

    fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(self.invalid_transition(self.status, target))
        }
    }

    const fn invalid_transition(&self, from: TaskStatus, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from,
            to,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Appends trimmed, non-empty tags not already present, preserving order.
fn merge_tags(existing: &mut Vec<String>, incoming: impl IntoIterator<Item = String>) {
    for tag in incoming {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !existing
            .iter()
            .any(|present| present.eq_ignore_ascii_case(trimmed))
        {
            existing.push(trimmed.to_owned());
        }
    }
}
