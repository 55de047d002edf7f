//! In-process store owning every Chronos aggregate.

use super::{Command, CommandOutcome, StoreError, StoreResult, TemplateInstance};
use crate::allocation::{
    adapters::memory::InMemoryAllocationRepository,
    domain::{AllocationId, TaskAllocation},
    services::AllocationEngine,
};
use crate::classifier::ports::TagClassifier;
use crate::config::ChronosConfig;
use crate::dashboard::DashboardSnapshot;
use crate::directory::{
    adapters::memory::InMemoryDirectoryRepository,
    domain::{Announcement, FeatureRequest, Project, ProjectId, TaskTemplate, User, UserId},
    services::DirectoryService,
};
use crate::focus::services::{FocusSessionService, FocusStatus};
use crate::knowledge::{
    adapters::memory::InMemoryKnowledgeRepository,
    domain::{KnowledgeEntry, KnowledgeEntryId},
    services::KnowledgeService,
};
use crate::routine::{
    adapters::memory::InMemoryRoutineRepository,
    domain::{RoutineDefinition, RoutineId, RoutineTemplate},
    services::RoutineInstantiator,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDetails, TaskId},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Tasks<C> = TaskLifecycleService<InMemoryTaskRepository, C>;
type Allocations<C> = AllocationEngine<InMemoryAllocationRepository, C>;
type Knowledge<C> = KnowledgeService<InMemoryKnowledgeRepository, C>;
type Routines<C> = RoutineInstantiator<InMemoryRoutineRepository, InMemoryTaskRepository, C>;
type Focus<X, C> = FocusSessionService<
    InMemoryTaskRepository,
    InMemoryAllocationRepository,
    InMemoryKnowledgeRepository,
    X,
    C,
>;

/// Explicit store for tasks, allocations, routines, knowledge entries and
/// directory records.
///
/// Every mutation goes through [`ChronosStore::apply`]; the remaining
/// methods are read-only queries.
pub struct ChronosStore<X, C>
where
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    config: ChronosConfig,
    directory: DirectoryService<InMemoryDirectoryRepository, C>,
    tasks: Tasks<C>,
    allocations: Allocations<C>,
    knowledge: Knowledge<C>,
    routines: Routines<C>,
    focus: Focus<X, C>,
    classifier: Arc<X>,
}

impl<X, C> Clone for ChronosStore<X, C>
where
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            directory: self.directory.clone(),
            tasks: self.tasks.clone(),
            allocations: self.allocations.clone(),
            knowledge: self.knowledge.clone(),
            routines: self.routines.clone(),
            focus: self.focus.clone(),
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<X, C> ChronosStore<X, C>
where
    X: TagClassifier,
    C: Clock + Send + Sync,
{
    /// Creates an empty store backed by in-memory repositories.
    #[must_use]
    pub fn new(config: ChronosConfig, classifier: Arc<X>, clock: Arc<C>) -> Self {
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let allocation_repository = Arc::new(InMemoryAllocationRepository::new());
        let knowledge_repository = Arc::new(InMemoryKnowledgeRepository::new());

        let directory = DirectoryService::new(
            Arc::new(InMemoryDirectoryRepository::new()),
            Arc::clone(&clock),
        );
        let tasks = TaskLifecycleService::new(Arc::clone(&task_repository), Arc::clone(&clock));
        let allocations = AllocationEngine::new(allocation_repository, Arc::clone(&clock))
            .with_removal_grace_seconds(config.removal_grace_seconds);
        let knowledge = KnowledgeService::new(knowledge_repository, Arc::clone(&clock));
        let routines = RoutineInstantiator::new(
            Arc::new(InMemoryRoutineRepository::new()),
            task_repository,
            Arc::clone(&clock),
        );
        let focus = FocusSessionService::new(
            tasks.clone(),
            allocations.clone(),
            knowledge.clone(),
            Arc::clone(&classifier),
            clock,
        )
        .with_max_running_per_user(config.max_running_per_user)
        .with_min_text_chars(config.min_debrief_chars);

        Self {
            config,
            directory,
            tasks,
            allocations,
            knowledge,
            routines,
            focus,
            classifier,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ChronosConfig {
        &self.config
    }

    /// Applies a command.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when validation, a referenced record or
    /// persistence fails. Failed commands leave no partial state behind
    /// except where a multi-record flow had already committed earlier
    /// steps.
    pub async fn apply(&self, command: Command) -> StoreResult<CommandOutcome> {
        match command {
            Command::RegisterUser(request) => Ok(CommandOutcome::User(
                self.directory.register_user(request).await?,
            )),
            Command::SetUserRole { user_id, role } => Ok(CommandOutcome::User(
                self.directory.set_role(user_id, role).await?,
            )),
            Command::DeactivateUser(user_id) => Ok(CommandOutcome::User(
                self.directory.deactivate_user(user_id).await?,
            )),
            Command::CreateProject(request) => Ok(CommandOutcome::Project(
                self.directory.create_project(request).await?,
            )),
            Command::RenameProject { project_id, name } => Ok(CommandOutcome::Project(
                self.directory.rename_project(project_id, name).await?,
            )),
            Command::ArchiveProject(project_id) => Ok(CommandOutcome::Project(
                self.directory.archive_project(project_id).await?,
            )),
            Command::PostAnnouncement(request) => Ok(CommandOutcome::Announcement(
                self.directory.post_announcement(request).await?,
            )),
            Command::SubmitFeatureRequest {
                title,
                description,
                requester_id,
            } => Ok(CommandOutcome::FeatureRequest(
                self.directory
                    .submit_feature_request(title, description, requester_id)
                    .await?,
            )),
            Command::VoteFeatureRequest {
                request_id,
                user_id,
            } => Ok(CommandOutcome::FeatureRequest(
                self.directory
                    .vote_feature_request(request_id, user_id)
                    .await?,
            )),
            Command::SetFeatureRequestStatus { request_id, status } => {
                Ok(CommandOutcome::FeatureRequest(
                    self.directory
                        .set_feature_request_status(request_id, status)
                        .await?,
                ))
            }
            Command::CreateTaskTemplate(request) => Ok(CommandOutcome::TaskTemplate(
                self.directory.create_task_template(request).await?,
            )),
            Command::InstantiateTemplate {
                template_id,
                owner_id,
                instance,
            } => {
                let template = self.directory.task_template(template_id).await?;
                let details = template_details(&template, instance)?;
                self.create_task(CreateTaskRequest::new(owner_id, details))
                    .await
            }
            Command::CreateTask(request) => self.create_task(request).await,
            Command::ReviseTask { task_id, details } => {
                let task = self.tasks.find(task_id).await?;
                self.ensure_task_references(task.owner_id(), &details)
                    .await?;
                Ok(CommandOutcome::Task(
                    self.tasks.revise(task_id, details).await?,
                ))
            }
            Command::TransitionTask(request) => Ok(CommandOutcome::Task(
                self.tasks.transition_task(request).await?,
            )),
            Command::SubmitTask {
                task_id,
                submission,
            } => Ok(CommandOutcome::Task(
                self.tasks.submit(task_id, submission).await?,
            )),
            Command::ApproveTask(task_id) => {
                Ok(CommandOutcome::Task(self.tasks.approve(task_id).await?))
            }
            Command::RejectTask(task_id) => {
                Ok(CommandOutcome::Task(self.tasks.reject(task_id).await?))
            }
            Command::ReopenTask(task_id) => {
                Ok(CommandOutcome::Task(self.tasks.reopen(task_id).await?))
            }
            Command::ArchiveTask(task_id) => {
                Ok(CommandOutcome::Task(self.tasks.archive(task_id).await?))
            }
            Command::DeleteTask(task_id) => {
                self.tasks.delete(task_id).await?;
                Ok(CommandOutcome::TaskDeleted(task_id))
            }
            Command::PlanAllocation(request) => {
                self.tasks.find(request.task_id()).await?;
                self.active_user(request.user_id()).await?;
                Ok(CommandOutcome::Allocation(
                    self.allocations.plan(request).await?,
                ))
            }
            Command::RemoveAllocation(allocation_id) => {
                if self.focus.has_session(allocation_id)? {
                    self.focus.cancel(allocation_id).await?;
                } else {
                    self.allocations.remove(allocation_id).await?;
                }
                Ok(CommandOutcome::AllocationRemoved(allocation_id))
            }
            Command::SweepMissed { today } => Ok(CommandOutcome::AllocationsMissed(
                self.allocations.sweep_missed(today).await?,
            )),
            Command::StartFocus { task_id, user_id } => {
                self.active_user(user_id).await?;
                let allocation = self.focus.start_focus(task_id, user_id).await?;
                Ok(CommandOutcome::Focus(self.focus.status(allocation.id())?))
            }
            Command::StartPlannedFocus(allocation_id) => {
                let allocation = self.focus.start_planned(allocation_id).await?;
                Ok(CommandOutcome::Focus(self.focus.status(allocation.id())?))
            }
            Command::PauseFocus(allocation_id) => Ok(CommandOutcome::Focus(
                self.focus.pause(allocation_id).await?,
            )),
            Command::ResumeFocus(allocation_id) => Ok(CommandOutcome::Focus(
                self.focus.resume(allocation_id).await?,
            )),
            Command::CancelFocus(allocation_id) => {
                self.focus.cancel(allocation_id).await?;
                Ok(CommandOutcome::FocusCancelled(allocation_id))
            }
            Command::FinalizeFocus(debrief) => Ok(CommandOutcome::FocusCompleted(Box::new(
                self.focus.finalize(debrief).await?,
            ))),
            Command::CreateRoutine {
                owner_id,
                definition,
            } => {
                self.active_user(owner_id).await?;
                self.ensure_routine_references(&definition).await?;
                Ok(CommandOutcome::Routine(
                    self.routines.create_draft(owner_id, definition).await?,
                ))
            }
            Command::ReviseRoutine {
                routine_id,
                definition,
            } => {
                self.ensure_routine_references(&definition).await?;
                Ok(CommandOutcome::Routine(
                    self.routines.revise(routine_id, definition).await?,
                ))
            }
            Command::ActivateRoutine(routine_id) => Ok(CommandOutcome::Routine(
                self.routines.activate(routine_id).await?,
            )),
            Command::ToggleRoutineFrozen(routine_id) => Ok(CommandOutcome::Routine(
                self.routines.toggle_frozen(routine_id).await?,
            )),
            Command::CompleteRoutine(routine_id) => Ok(CommandOutcome::Routine(
                self.routines.complete(routine_id).await?,
            )),
            Command::SetRotationIndex { routine_id, index } => Ok(CommandOutcome::Routine(
                self.routines.set_rotation_index(routine_id, index).await?,
            )),
            Command::DeployRoutine {
                routine_id,
                on_date,
            } => Ok(CommandOutcome::Deployment(
                self.routines.deploy(routine_id, on_date).await?,
            )),
        }
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Task`] for unknown tasks.
    pub async fn task(&self, task_id: TaskId) -> StoreResult<Task> {
        Ok(self.tasks.find(task_id).await?)
    }

    /// Lists all tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Task`] when the lookup fails.
    pub async fn tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.tasks.list().await?)
    }

    /// Lists tasks the user owns, is assigned to or collaborates on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Task`] when the lookup fails.
    pub async fn tasks_involving(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        Ok(self.tasks.list_involving(user_id).await?)
    }

    /// Returns an allocation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Allocation`] for unknown allocations.
    pub async fn allocation(&self, allocation_id: AllocationId) -> StoreResult<TaskAllocation> {
        Ok(self.allocations.find(allocation_id).await?)
    }

    /// Lists allocations for a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Allocation`] when the lookup fails.
    pub async fn allocations_for_task(&self, task_id: TaskId) -> StoreResult<Vec<TaskAllocation>> {
        Ok(self.allocations.for_task(task_id).await?)
    }

    /// Lists a user's allocations on one date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Allocation`] when the lookup fails.
    pub async fn allocations_for_user_on(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> StoreResult<Vec<TaskAllocation>> {
        Ok(self.allocations.for_user_on(user_id, date).await?)
    }

    /// Returns the current state of a focus session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Focus`] for unknown sessions.
    pub fn focus_status(&self, allocation_id: AllocationId) -> StoreResult<FocusStatus> {
        Ok(self.focus.status(allocation_id)?)
    }

    /// Returns a routine by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Routine`] for unknown routines.
    pub async fn routine(&self, routine_id: RoutineId) -> StoreResult<RoutineTemplate> {
        Ok(self.routines.find(routine_id).await?)
    }

    /// Lists active routines that fire on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Routine`] when the lookup fails.
    pub async fn routines_due_on(&self, date: NaiveDate) -> StoreResult<Vec<RoutineTemplate>> {
        Ok(self.routines.due_on(date).await?)
    }

    /// Returns a knowledge entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Knowledge`] for unknown entries.
    pub async fn knowledge_entry(&self, id: KnowledgeEntryId) -> StoreResult<KnowledgeEntry> {
        Ok(self.knowledge.entry(id).await?)
    }

    /// Lists knowledge entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Knowledge`] when the lookup fails.
    pub async fn knowledge_entries(&self) -> StoreResult<Vec<KnowledgeEntry>> {
        Ok(self.knowledge.entries().await?)
    }

    /// Finds knowledge entries carrying `tag`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Knowledge`] when the lookup fails.
    pub async fn search_knowledge(&self, tag: &str) -> StoreResult<Vec<KnowledgeEntry>> {
        Ok(self.knowledge.search_by_tag(tag).await?)
    }

    /// Returns a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] for unknown users.
    pub async fn user(&self, user_id: UserId) -> StoreResult<User> {
        Ok(self.directory.user(user_id).await?)
    }

    /// Lists users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] when the lookup fails.
    pub async fn users(&self) -> StoreResult<Vec<User>> {
        Ok(self.directory.users().await?)
    }

    /// Lists projects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] when the lookup fails.
    pub async fn projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.directory.projects().await?)
    }

    /// Lists announcements, pinned first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] when the lookup fails.
    pub async fn announcements(&self) -> StoreResult<Vec<Announcement>> {
        Ok(self.directory.announcements().await?)
    }

    /// Lists feature requests, most voted first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] when the lookup fails.
    pub async fn feature_requests(&self) -> StoreResult<Vec<FeatureRequest>> {
        Ok(self.directory.feature_requests().await?)
    }

    /// Lists task templates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Directory`] when the lookup fails.
    pub async fn task_templates(&self) -> StoreResult<Vec<TaskTemplate>> {
        Ok(self.directory.task_templates().await?)
    }

    /// Captures tasks and allocations for the dashboard aggregators.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when either lookup fails.
    pub async fn dashboard(&self) -> StoreResult<DashboardSnapshot> {
        let tasks = self.tasks.list().await?;
        let allocations = self.allocations.list().await?;
        debug!(
            tasks = tasks.len(),
            allocations = allocations.len(),
            "captured dashboard snapshot"
        );
        Ok(DashboardSnapshot::new(tasks, allocations)
            .with_approaching_window(self.config.approaching_window()))
    }

    async fn create_task(&self, request: CreateTaskRequest) -> StoreResult<CommandOutcome> {
        self.ensure_task_references(request.owner_id(), request.details())
            .await?;
        let risk_hint = self.risk_hint(request.details()).await;
        let task = self.tasks.create(request).await?;
        if let Some(hint) = &risk_hint {
            info!(task_id = %task.id(), hint = %hint, "classifier flagged task");
        }
        Ok(CommandOutcome::TaskCreated { task, risk_hint })
    }

    async fn risk_hint(&self, details: &TaskDetails) -> Option<String> {
        let text = format!(
            "{}\n{}",
            details.title(),
            details.description().unwrap_or_default()
        );
        self.classifier
            .assess_risk(&text)
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "risk assessment failed; continuing without a hint");
                None
            })
    }

    async fn ensure_task_references(
        &self,
        owner_id: UserId,
        details: &TaskDetails,
    ) -> StoreResult<()> {
        self.active_user(owner_id).await?;
        if let Some(assignee_id) = details.assignee_id() {
            self.active_user(assignee_id).await?;
        }
        for collaborator_id in details.collaborator_ids() {
            self.active_user(*collaborator_id).await?;
        }
        if let Some(project_id) = details.project_id() {
            self.open_project(project_id).await?;
        }
        Ok(())
    }

    async fn ensure_routine_references(&self, definition: &RoutineDefinition) -> StoreResult<()> {
        for assignee_id in &definition.assignee_ids {
            self.active_user(*assignee_id).await?;
        }
        if let Some(project_id) = definition.project_id {
            self.open_project(project_id).await?;
        }
        Ok(())
    }

    async fn active_user(&self, user_id: UserId) -> StoreResult<User> {
        let user = self.directory.user(user_id).await?;
        if !user.is_active() {
            return Err(StoreError::InactiveUser(user_id));
        }
        Ok(user)
    }

    async fn open_project(&self, project_id: ProjectId) -> StoreResult<Project> {
        let project = self.directory.project(project_id).await?;
        project.ensure_open()?;
        Ok(project)
    }
}

fn template_details(
    template: &TaskTemplate,
    instance: TemplateInstance,
) -> StoreResult<TaskDetails> {
    let mut details = TaskDetails::new(template.title(), template.budget())?
        .with_tags(template.tags().iter().cloned());
    if let Some(description) = template.description() {
        details = details.with_description(description);
    }
    if let Some(goal) = template.goal() {
        details = details.with_goal(goal);
    }
    if let Some(due_at) = instance.due_at {
        details = details.with_due_at(due_at);
    }
    if let Some(project_id) = instance.project_id {
        details = details.with_project(project_id);
    }
    if let Some(assignee_id) = instance.assignee_id {
        details = details.with_assignee(assignee_id);
    }
    Ok(details)
}
