//! Repository port for users, projects and admin console records.

use crate::directory::domain::{
    Announcement, FeatureRequest, FeatureRequestId, Project, ProjectId, TaskTemplate,
    TaskTemplateId, User, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Directory persistence contract.
///
/// `save_*` methods insert or replace by identifier.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateEmail`] when another user
    /// already owns the email address.
    async fn store_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::UserNotFound`] when the user does
    /// not exist.
    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>>;

    /// Returns all users ordered by name.
    async fn list_users(&self) -> DirectoryRepositoryResult<Vec<User>>;

    /// Inserts or replaces a project.
    async fn save_project(&self, project: &Project) -> DirectoryRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> DirectoryRepositoryResult<Option<Project>>;

    /// Returns all projects ordered by name.
    async fn list_projects(&self) -> DirectoryRepositoryResult<Vec<Project>>;

    /// Stores an announcement.
    async fn save_announcement(&self, announcement: &Announcement)
    -> DirectoryRepositoryResult<()>;

    /// Returns all announcements in insertion order.
    async fn list_announcements(&self) -> DirectoryRepositoryResult<Vec<Announcement>>;

    /// Inserts or replaces a feature request.
    async fn save_feature_request(&self, request: &FeatureRequest)
    -> DirectoryRepositoryResult<()>;

    /// Finds a feature request by identifier.
    async fn find_feature_request(
        &self,
        id: FeatureRequestId,
    ) -> DirectoryRepositoryResult<Option<FeatureRequest>>;

    /// Returns all feature requests in insertion order.
    async fn list_feature_requests(&self) -> DirectoryRepositoryResult<Vec<FeatureRequest>>;

    /// Inserts or replaces a task template.
    async fn save_task_template(&self, template: &TaskTemplate) -> DirectoryRepositoryResult<()>;

    /// Finds a task template by identifier.
    async fn find_task_template(
        &self,
        id: TaskTemplateId,
    ) -> DirectoryRepositoryResult<Option<TaskTemplate>>;

    /// Returns all task templates ordered by name.
    async fn list_task_templates(&self) -> DirectoryRepositoryResult<Vec<TaskTemplate>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// Another user already uses the email address.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(String),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
