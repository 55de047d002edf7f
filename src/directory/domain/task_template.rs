//! Reusable task templates managed from the admin console.

use super::{DirectoryDomainError, TaskTemplateId, error::non_empty};
use crate::task::domain::{GoalCategory, TimeBudget};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Predefined values for creating similar tasks quickly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    id: TaskTemplateId,
    name: String,
    title: String,
    description: Option<String>,
    budget: TimeBudget,
    goal: Option<GoalCategory>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TaskTemplate {
    /// Creates a task template.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyName`] or
    /// [`DirectoryDomainError::EmptyTitle`] for blank values.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        budget: TimeBudget,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        Ok(Self {
            id: TaskTemplateId::new(),
            name: non_empty(name, DirectoryDomainError::EmptyName)?,
            title: non_empty(title, DirectoryDomainError::EmptyTitle)?,
            description: None,
            budget,
            goal: None,
            tags: Vec::new(),
            created_at: clock.utc(),
        })
    }

    /// Sets the default description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default goal category.
    #[must_use]
    pub const fn with_goal(mut self, goal: GoalCategory) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the default tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TaskTemplateId {
        self.id
    }

    /// Returns the template name shown in pickers.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the title given to instantiated tasks.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the default description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the default time budget.
    #[must_use]
    pub const fn budget(&self) -> TimeBudget {
        self.budget
    }

    /// Returns the default goal category.
    #[must_use]
    pub const fn goal(&self) -> Option<GoalCategory> {
        self.goal
    }

    /// Returns the default tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
