//! Knowledge base entries written up from completed tasks.

use super::KnowledgeEntryId;
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Facts about a completed task that feed a knowledge write-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteUp {
    /// Task the write-up describes.
    pub task_id: TaskId,
    /// User who finished the work.
    pub author_id: UserId,
    /// Task title.
    pub title: String,
    /// Reflection on the finished work.
    pub summary: String,
    /// Explanation for exceeding the budget, if any.
    pub overrun_reason: Option<String>,
    /// Tags describing the work.
    pub tags: Vec<String>,
    /// Actual seconds spent on the attempt.
    pub actual_seconds: u64,
}

/// A rendered, searchable knowledge base entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    id: KnowledgeEntryId,
    write_up: WriteUp,
    body: String,
    created_at: DateTime<Utc>,
}

impl KnowledgeEntry {
    /// Creates an entry from a write-up and its rendered Markdown body.
    #[must_use]
    pub fn new(write_up: WriteUp, body: String, clock: &impl Clock) -> Self {
        Self {
            id: KnowledgeEntryId::new(),
            write_up,
            body,
            created_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> KnowledgeEntryId {
        self.id
    }

    /// Returns the source task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.write_up.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.write_up.author_id
    }

    /// Returns the entry title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.write_up.title
    }

    /// Returns the reflection summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.write_up.summary
    }

    /// Returns the overrun explanation, if any.
    #[must_use]
    pub fn overrun_reason(&self) -> Option<&str> {
        self.write_up.overrun_reason.as_deref()
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.write_up.tags
    }

    /// Returns the actual seconds spent.
    #[must_use]
    pub const fn actual_seconds(&self) -> u64 {
        self.write_up.actual_seconds
    }

    /// Returns the rendered Markdown body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the entry carries `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim();
        self.write_up
            .tags
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
    }
}
