//! Service layer for users, projects, announcements, feature requests and
//! task templates.

use crate::directory::{
    domain::{
        Announcement, DirectoryDomainError, FeatureRequest, FeatureRequestId,
        FeatureRequestStatus, Project, ProjectId, TaskTemplate, TaskTemplateId, User, UserId,
        UserRole,
    },
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::task::domain::{GoalCategory, TimeBudget};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    role: UserRole,
}

impl RegisterUserRequest {
    /// Creates a request for a regular member.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: UserRole::Member,
        }
    }

    /// Sets the access role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    owner_id: UserId,
}

impl CreateProjectRequest {
    /// Creates a request with the required project fields.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            name: name.into(),
            description: None,
            owner_id,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for posting an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAnnouncementRequest {
    title: String,
    body: String,
    author_id: UserId,
    pinned: bool,
}

impl PostAnnouncementRequest {
    /// Creates an unpinned announcement request.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: UserId) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id,
            pinned: false,
        }
    }

    /// Pins the announcement to the top of listings.
    #[must_use]
    pub const fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }
}

/// Request payload for creating a task template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskTemplateRequest {
    name: String,
    title: String,
    budget: TimeBudget,
    description: Option<String>,
    goal: Option<GoalCategory>,
    tags: Vec<String>,
}

impl CreateTaskTemplateRequest {
    /// Creates a request with the required template fields.
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>, budget: TimeBudget) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            budget,
            description: None,
            goal: None,
            tags: Vec::new(),
        }
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
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The feature request does not exist.
    #[error("feature request not found: {0}")]
    FeatureRequestNotFound(FeatureRequestId),
    /// The task template does not exist.
    #[error("task template not found: {0}")]
    TaskTemplateNotFound(TaskTemplateId),
}

/// Result type for directory service operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory orchestration service backing the admin console.
pub struct DirectoryService<R, C>
where
    R: DirectoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for DirectoryService<R, C>
where
    R: DirectoryRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> DirectoryService<R, C>
where
    R: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a team member.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when validation fails or the email address
    /// is already registered.
    pub async fn register_user(&self, request: RegisterUserRequest) -> DirectoryResult<User> {
        let user = User::new(request.name, request.email, request.role, &*self.clock)?;
        self.repository.store_user(&user).await?;
        info!(user_id = %user.id(), role = user.role().as_str(), "registered user");
        Ok(user)
    }

    /// Returns a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] for unknown users.
    pub async fn user(&self, id: UserId) -> DirectoryResult<User> {
        self.repository
            .find_user(id)
            .await?
            .ok_or(DirectoryError::UserNotFound(id))
    }

    /// Lists users ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn users(&self) -> DirectoryResult<Vec<User>> {
        Ok(self.repository.list_users().await?)
    }

    /// Changes a user's access role.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] for unknown users.
    pub async fn set_role(&self, id: UserId, role: UserRole) -> DirectoryResult<User> {
        let mut user = self.user(id).await?;
        user.set_role(role);
        self.repository.update_user(&user).await?;
        info!(user_id = %id, role = role.as_str(), "changed user role");
        Ok(user)
    }

    /// Deactivates a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] for unknown users.
    pub async fn deactivate_user(&self, id: UserId) -> DirectoryResult<User> {
        let mut user = self.user(id).await?;
        user.deactivate();
        self.repository.update_user(&user).await?;
        info!(user_id = %id, "deactivated user");
        Ok(user)
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the owner is unknown or the name is
    /// blank.
    pub async fn create_project(&self, request: CreateProjectRequest) -> DirectoryResult<Project> {
        self.user(request.owner_id).await?;
        let project = Project::new(
            request.name,
            request.description,
            request.owner_id,
            &*self.clock,
        )?;
        self.repository.save_project(&project).await?;
        info!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Returns a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::ProjectNotFound`] for unknown projects.
    pub async fn project(&self, id: ProjectId) -> DirectoryResult<Project> {
        self.repository
            .find_project(id)
            .await?
            .ok_or(DirectoryError::ProjectNotFound(id))
    }

    /// Lists projects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn projects(&self) -> DirectoryResult<Vec<Project>> {
        Ok(self.repository.list_projects().await?)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for unknown or archived projects and blank
    /// names.
    pub async fn rename_project(
        &self,
        id: ProjectId,
        name: impl Into<String>,
    ) -> DirectoryResult<Project> {
        let mut project = self.project(id).await?;
        project.rename(name, &*self.clock)?;
        self.repository.save_project(&project).await?;
        Ok(project)
    }

    /// Archives a project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::ProjectNotFound`] for unknown projects.
    pub async fn archive_project(&self, id: ProjectId) -> DirectoryResult<Project> {
        let mut project = self.project(id).await?;
        project.archive(&*self.clock);
        self.repository.save_project(&project).await?;
        info!(project_id = %id, "archived project");
        Ok(project)
    }

    /// Posts an announcement.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the author is unknown or the title is
    /// blank.
    pub async fn post_announcement(
        &self,
        request: PostAnnouncementRequest,
    ) -> DirectoryResult<Announcement> {
        self.user(request.author_id).await?;
        let announcement = Announcement::new(
            request.title,
            request.body,
            request.author_id,
            request.pinned,
            &*self.clock,
        )?;
        self.repository.save_announcement(&announcement).await?;
        Ok(announcement)
    }

    /// Lists announcements, pinned first and newest first within each group.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn announcements(&self) -> DirectoryResult<Vec<Announcement>> {
        let mut announcements = self.repository.list_announcements().await?;
        announcements.sort_by(|left, right| {
            right
                .is_pinned()
                .cmp(&left.is_pinned())
                .then_with(|| right.created_at().cmp(&left.created_at()))
        });
        Ok(announcements)
    }

    /// Submits a feature request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the requester is unknown or the title
    /// is blank.
    pub async fn submit_feature_request(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        requester_id: UserId,
    ) -> DirectoryResult<FeatureRequest> {
        self.user(requester_id).await?;
        let request = FeatureRequest::new(title, description, requester_id, &*self.clock)?;
        self.repository.save_feature_request(&request).await?;
        Ok(request)
    }

    /// Records a user's vote on a feature request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] for unknown records or repeated votes.
    pub async fn vote_feature_request(
        &self,
        id: FeatureRequestId,
        user_id: UserId,
    ) -> DirectoryResult<FeatureRequest> {
        self.user(user_id).await?;
        let mut request = self.feature_request(id).await?;
        request.vote(user_id, &*self.clock)?;
        self.repository.save_feature_request(&request).await?;
        Ok(request)
    }

    /// Updates the triage status of a feature request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::FeatureRequestNotFound`] for unknown
    /// requests.
    pub async fn set_feature_request_status(
        &self,
        id: FeatureRequestId,
        status: FeatureRequestStatus,
    ) -> DirectoryResult<FeatureRequest> {
        let mut request = self.feature_request(id).await?;
        request.set_status(status, &*self.clock);
        self.repository.save_feature_request(&request).await?;
        info!(request_id = %id, status = status.as_str(), "triaged feature request");
        Ok(request)
    }

    /// Lists feature requests, most voted first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn feature_requests(&self) -> DirectoryResult<Vec<FeatureRequest>> {
        let mut requests = self.repository.list_feature_requests().await?;
        requests.sort_by_key(|request| std::cmp::Reverse(request.votes()));
        Ok(requests)
    }

    /// Creates a task template.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Domain`] for blank names or titles.
    pub async fn create_task_template(
        &self,
        request: CreateTaskTemplateRequest,
    ) -> DirectoryResult<TaskTemplate> {
        let mut template =
            TaskTemplate::new(request.name, request.title, request.budget, &*self.clock)?
                .with_tags(request.tags);
        if let Some(description) = request.description {
            template = template.with_description(description);
        }
        if let Some(goal) = request.goal {
            template = template.with_goal(goal);
        }
        self.repository.save_task_template(&template).await?;
        Ok(template)
    }

    /// Returns a task template by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::TaskTemplateNotFound`] for unknown
    /// templates.
    pub async fn task_template(&self, id: TaskTemplateId) -> DirectoryResult<TaskTemplate> {
        self.repository
            .find_task_template(id)
            .await?
            .ok_or(DirectoryError::TaskTemplateNotFound(id))
    }

    /// Lists task templates ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn task_templates(&self) -> DirectoryResult<Vec<TaskTemplate>> {
        Ok(self.repository.list_task_templates().await?)
    }

    async fn feature_request(&self, id: FeatureRequestId) -> DirectoryResult<FeatureRequest> {
        self.repository
            .find_feature_request(id)
            .await?
            .ok_or(DirectoryError::FeatureRequestNotFound(id))
    }
}
