//! In-memory repository for directory records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{
        Announcement, FeatureRequest, FeatureRequestId, Project, ProjectId, TaskTemplate,
        TaskTemplateId, User, UserId,
    },
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory directory repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectoryRepository {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Project>,
    announcements: Vec<Announcement>,
    feature_requests: Vec<FeatureRequest>,
    task_templates: HashMap<TaskTemplateId, TaskTemplate>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<RwLockReadGuard<'_, InMemoryDirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> DirectoryRepositoryResult<RwLockWriteGuard<'_, InMemoryDirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Replaces the element with a matching key or appends it.
fn upsert_by<T: Clone, K: PartialEq>(items: &mut Vec<T>, item: &T, key: impl Fn(&T) -> K) {
    let wanted = key(item);
    if let Some(existing) = items.iter_mut().find(|candidate| key(candidate) == wanted) {
        existing.clone_from(item);
    } else {
        items.push(item.clone());
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn store_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if state
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(DirectoryRepositoryError::DuplicateEmail(
                user.email().to_owned(),
            ));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .users
            .get_mut(&user.id())
            .ok_or(DirectoryRepositoryError::UserNotFound(user.id()))?;
        slot.clone_from(user);
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn list_users(&self) -> DirectoryRepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.values().cloned().collect();
        users.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(users)
    }

    async fn save_project(&self, project: &Project) -> DirectoryRepositoryResult<()> {
        self.write()?.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> DirectoryRepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> DirectoryRepositoryResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read()?.projects.values().cloned().collect();
        projects.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(projects)
    }

    async fn save_announcement(
        &self,
        announcement: &Announcement,
    ) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        upsert_by(&mut state.announcements, announcement, Announcement::id);
        Ok(())
    }

    async fn list_announcements(&self) -> DirectoryRepositoryResult<Vec<Announcement>> {
        Ok(self.read()?.announcements.clone())
    }

    async fn save_feature_request(
        &self,
        request: &FeatureRequest,
    ) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        upsert_by(&mut state.feature_requests, request, FeatureRequest::id);
        Ok(())
    }

    async fn find_feature_request(
        &self,
        id: FeatureRequestId,
    ) -> DirectoryRepositoryResult<Option<FeatureRequest>> {
        Ok(self
            .read()?
            .feature_requests
            .iter()
            .find(|request| request.id() == id)
            .cloned())
    }

    async fn list_feature_requests(&self) -> DirectoryRepositoryResult<Vec<FeatureRequest>> {
        Ok(self.read()?.feature_requests.clone())
    }

    async fn save_task_template(&self, template: &TaskTemplate) -> DirectoryRepositoryResult<()> {
        self.write()?
            .task_templates
            .insert(template.id(), template.clone());
        Ok(())
    }

    async fn find_task_template(
        &self,
        id: TaskTemplateId,
    ) -> DirectoryRepositoryResult<Option<TaskTemplate>> {
        Ok(self.read()?.task_templates.get(&id).cloned())
    }

    async fn list_task_templates(&self) -> DirectoryRepositoryResult<Vec<TaskTemplate>> {
        let mut templates: Vec<TaskTemplate> =
            self.read()?.task_templates.values().cloned().collect();
        templates.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(templates)
    }
}
