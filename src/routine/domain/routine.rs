//! Routine template aggregate.

use super::{AssignmentStrategy, Recurrence, RoutineDomainError, RoutineId, RoutineStatus};
use crate::directory::domain::{ProjectId, UserId};
use crate::task::domain::{GoalCategory, TimeBudget};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Editable definition of a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDefinition {
    /// Title given to spawned tasks.
    pub title: String,
    /// Description given to spawned tasks.
    pub description: Option<String>,
    /// Budget given to spawned tasks.
    pub budget: TimeBudget,
    /// When the routine is meant to fire.
    pub recurrence: Recurrence,
    /// How spawned tasks are assigned.
    pub strategy: AssignmentStrategy,
    /// Users receiving spawned tasks.
    pub assignee_ids: Vec<UserId>,
    /// Goal category of spawned tasks.
    pub goal: Option<GoalCategory>,
    /// Project of spawned tasks.
    pub project_id: Option<ProjectId>,
}

impl RoutineDefinition {
    /// Creates a definition with a static strategy and no assignees.
    #[must_use]
    pub fn new(title: impl Into<String>, budget: TimeBudget, recurrence: Recurrence) -> Self {
        Self {
            title: title.into(),
            description: None,
            budget,
            recurrence,
            strategy: AssignmentStrategy::Static,
            assignee_ids: Vec::new(),
            goal: None,
            project_id: None,
        }
    }

    /// Sets the assignment strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: AssignmentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the assignees, dropping duplicates while keeping order.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = Vec::new();
        for assignee in assignees {
            if !self.assignee_ids.contains(&assignee) {
                self.assignee_ids.push(assignee);
            }
        }
        self
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

    /// Sets the project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// A recurrence definition that can be deployed into concrete tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    id: RoutineId,
    owner_id: UserId,
    definition: RoutineDefinition,
    status: RoutineStatus,
    current_rotation_index: usize,
    last_deployed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoutineTemplate {
    /// Creates a draft routine.
    #[must_use]
    pub fn new(owner_id: UserId, definition: RoutineDefinition, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RoutineId::new(),
            owner_id,
            definition,
            status: RoutineStatus::Draft,
            current_rotation_index: 0,
            last_deployed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the routine identifier.
    #[must_use]
    pub const fn id(&self) -> RoutineId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the definition.
    #[must_use]
    pub const fn definition(&self) -> &RoutineDefinition {
        &self.definition
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RoutineStatus {
        self.status
    }

    /// Returns the index of the next rotating assignee.
    #[must_use]
    pub const fn current_rotation_index(&self) -> usize {
        self.current_rotation_index
    }

    /// Returns the latest deployment timestamp.
    #[must_use]
    pub const fn last_deployed_at(&self) -> Option<DateTime<Utc>> {
        self.last_deployed_at
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

    /// Replaces the definition. The rotation index restarts when it no longer
    /// addresses an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::Completed`] for completed routines.
    pub fn revise(
        &mut self,
        definition: RoutineDefinition,
        clock: &impl Clock,
    ) -> Result<(), RoutineDomainError> {
        if self.status == RoutineStatus::Completed {
            return Err(RoutineDomainError::Completed(self.id));
        }
        if self.status == RoutineStatus::Active {
            ensure_deployable(self.id, &definition)?;
        }
        if self.current_rotation_index >= definition.assignee_ids.len() {
            self.current_rotation_index = 0;
        }
        self.definition = definition;
        self.touch(clock);
        Ok(())
    }

    /// Activates a draft after checking its title and assignees.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::MissingTitle`],
    /// [`RoutineDomainError::NoAssignees`] or
    /// [`RoutineDomainError::InvalidStatusTransition`].
    pub fn activate(&mut self, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        if self.status != RoutineStatus::Draft {
            return Err(self.invalid_transition(RoutineStatus::Active));
        }
        ensure_deployable(self.id, &self.definition)?;
        self.move_to(RoutineStatus::Active, clock)
    }

    /// Pauses an active routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidStatusTransition`] unless active.
    pub fn freeze(&mut self, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        self.move_to(RoutineStatus::Frozen, clock)
    }

    /// Resumes a frozen routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidStatusTransition`] unless frozen.
    pub fn resume(&mut self, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        if self.status != RoutineStatus::Frozen {
            return Err(self.invalid_transition(RoutineStatus::Active));
        }
        self.move_to(RoutineStatus::Active, clock)
    }

    /// Toggles between active and frozen.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidStatusTransition`] for drafts and
    /// completed routines.
    pub fn toggle_frozen(&mut self, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        match self.status {
            RoutineStatus::Frozen => self.resume(clock),
            _ => self.freeze(clock),
        }
    }

    /// Marks an active routine as completed.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidStatusTransition`] unless active.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        self.move_to(RoutineStatus::Completed, clock)
    }

    /// Overrides the next rotating assignee.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::RotationIndexOutOfRange`] when `index`
    /// does not address an assignee.
    pub fn set_rotation_index(
        &mut self,
        index: usize,
        clock: &impl Clock,
    ) -> Result<(), RoutineDomainError> {
        let assignees = self.definition.assignee_ids.len();
        if index >= assignees {
            return Err(RoutineDomainError::RotationIndexOutOfRange { index, assignees });
        }
        self.current_rotation_index = index;
        self.touch(clock);
        Ok(())
    }

    /// Returns the users who receive the next deployment.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::NotDeployable`] unless the routine is
    /// active.
    pub fn next_assignees(&self) -> Result<Vec<UserId>, RoutineDomainError> {
        if self.status != RoutineStatus::Active {
            return Err(RoutineDomainError::NotDeployable {
                routine_id: self.id,
                status: self.status,
            });
        }
        let assignees = &self.definition.assignee_ids;
        let next = match self.definition.strategy {
            AssignmentStrategy::Static => assignees.clone(),
            AssignmentStrategy::Rotating => assignees
                .get(self.current_rotation_index)
                .or_else(|| assignees.first())
                .copied()
                .into_iter()
                .collect(),
        };
        if next.is_empty() {
            return Err(RoutineDomainError::NoAssignees(self.id));
        }
        Ok(next)
    }

    /// Records a deployment and advances the rotation for rotating routines.
    ///
    /// Returns the users who received the deployment.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::NotDeployable`] unless the routine is
    /// active.
    pub fn record_deployment(&mut self, clock: &impl Clock) -> Result<Vec<UserId>, RoutineDomainError> {
        let assignees = self.next_assignees()?;
        if self.definition.strategy == AssignmentStrategy::Rotating {
            let next_index = self.current_rotation_index.saturating_add(1);
            self.current_rotation_index = next_index
                .checked_rem(self.definition.assignee_ids.len())
                .unwrap_or(0);
        }
        let timestamp = clock.utc();
        self.last_deployed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(assignees)
    }

    fn move_to(&mut self, target: RoutineStatus, clock: &impl Clock) -> Result<(), RoutineDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    const fn invalid_transition(&self, to: RoutineStatus) -> RoutineDomainError {
        RoutineDomainError::InvalidStatusTransition {
            routine_id: self.id,
            from: self.status,
            to,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Checks that a definition has a title and at least one assignee.
fn ensure_deployable(
    routine_id: RoutineId,
    definition: &RoutineDefinition,
) -> Result<(), RoutineDomainError> {
    if definition.title.trim().is_empty() {
        return Err(RoutineDomainError::MissingTitle(routine_id));
    }
    if definition.assignee_ids.is_empty() {
        return Err(RoutineDomainError::NoAssignees(routine_id));
    }
    Ok(())
}
