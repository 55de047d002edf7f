//! Commands accepted by the store and the outcomes they produce.

use crate::allocation::{
    domain::{AllocationId, TaskAllocation},
    services::PlanAllocationRequest,
};
use crate::directory::{
    domain::{
        Announcement, FeatureRequest, FeatureRequestId, FeatureRequestStatus, Project, ProjectId,
        TaskTemplate, TaskTemplateId, User, UserId, UserRole,
    },
    services::{
        CreateProjectRequest, CreateTaskTemplateRequest, PostAnnouncementRequest,
        RegisterUserRequest,
    },
};
use crate::focus::{
    domain::DebriefRequest,
    services::{FocusOutcome, FocusStatus},
};
use crate::routine::{
    domain::{RoutineDefinition, RoutineId, RoutineTemplate},
    services::Deployment,
};
use crate::task::{
    domain::{Submission, Task, TaskDetails, TaskId},
    services::{CreateTaskRequest, TransitionTaskRequest},
};
use chrono::{DateTime, NaiveDate, Utc};

/// Per-instance overrides applied when a task template is instantiated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateInstance {
    /// Due time of the new task.
    pub due_at: Option<DateTime<Utc>>,
    /// Project of the new task.
    pub project_id: Option<ProjectId>,
    /// Assignee of the new task.
    pub assignee_id: Option<UserId>,
}

/// A state change requested of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Registers a team member.
    RegisterUser(RegisterUserRequest),
    /// Changes a user's role.
    SetUserRole {
        /// User to update.
        user_id: UserId,
        /// New role.
        role: UserRole,
    },
    /// Deactivates a user.
    DeactivateUser(UserId),
    /// Creates a project.
    CreateProject(CreateProjectRequest),
    /// Renames a project.
    RenameProject {
        /// Project to rename.
        project_id: ProjectId,
        /// New name.
        name: String,
    },
    /// Archives a project.
    ArchiveProject(ProjectId),
    /// Posts an announcement.
    PostAnnouncement(PostAnnouncementRequest),
    /// Submits a feature request.
    SubmitFeatureRequest {
        /// Short title.
        title: String,
        /// Longer description.
        description: String,
        /// Submitting user.
        requester_id: UserId,
    },
    /// Votes on a feature request.
    VoteFeatureRequest {
        /// Request receiving the vote.
        request_id: FeatureRequestId,
        /// Voting user.
        user_id: UserId,
    },
    /// Triages a feature request.
    SetFeatureRequestStatus {
        /// Request to triage.
        request_id: FeatureRequestId,
        /// New status.
        status: FeatureRequestStatus,
    },
    /// Creates a reusable task template.
    CreateTaskTemplate(CreateTaskTemplateRequest),
    /// Creates a task from a template.
    InstantiateTemplate {
        /// Template to copy.
        template_id: TaskTemplateId,
        /// Owner of the new task.
        owner_id: UserId,
        /// Per-instance overrides.
        instance: TemplateInstance,
    },
    /// Creates a task.
    CreateTask(CreateTaskRequest),
    /// Replaces a task's editable details.
    ReviseTask {
        /// Task to revise.
        task_id: TaskId,
        /// New details.
        details: TaskDetails,
    },
    /// Moves a task to a status named by string.
    TransitionTask(TransitionTaskRequest),
    /// Hands work in for review.
    SubmitTask {
        /// Task being submitted.
        task_id: TaskId,
        /// Submission record.
        submission: Submission,
    },
    /// Approves submitted work.
    ApproveTask(TaskId),
    /// Sends submitted work back to `doing`.
    RejectTask(TaskId),
    /// Reopens finished work.
    ReopenTask(TaskId),
    /// Archives a task.
    ArchiveTask(TaskId),
    /// Deletes a task not linked to the knowledge base.
    DeleteTask(TaskId),
    /// Schedules a planned allocation.
    PlanAllocation(PlanAllocationRequest),
    /// Discards an allocation without meaningful progress.
    RemoveAllocation(AllocationId),
    /// Marks planned allocations before `today` as missed.
    SweepMissed {
        /// First date that is not yet missed.
        today: NaiveDate,
    },
    /// Starts focusing on a task with a new allocation.
    StartFocus {
        /// Task to work on.
        task_id: TaskId,
        /// Working user.
        user_id: UserId,
    },
    /// Starts focusing on a planned allocation.
    StartPlannedFocus(AllocationId),
    /// Pauses a focus session.
    PauseFocus(AllocationId),
    /// Resumes a focus session.
    ResumeFocus(AllocationId),
    /// Abandons a focus session within the grace period.
    CancelFocus(AllocationId),
    /// Completes a focus session with a debrief.
    FinalizeFocus(DebriefRequest),
    /// Saves a draft routine.
    CreateRoutine {
        /// Routine owner.
        owner_id: UserId,
        /// Routine definition.
        definition: RoutineDefinition,
    },
    /// Replaces a routine definition.
    ReviseRoutine {
        /// Routine to revise.
        routine_id: RoutineId,
        /// New definition.
        definition: RoutineDefinition,
    },
    /// Activates a draft routine.
    ActivateRoutine(RoutineId),
    /// Toggles a routine between active and frozen.
    ToggleRoutineFrozen(RoutineId),
    /// Marks a routine completed.
    CompleteRoutine(RoutineId),
    /// Sets the next rotating assignee.
    SetRotationIndex {
        /// Routine to update.
        routine_id: RoutineId,
        /// Index into the assignee list.
        index: usize,
    },
    /// Deploys a routine for a date.
    DeployRoutine {
        /// Routine to deploy.
        routine_id: RoutineId,
        /// Date the spawned tasks are due.
        on_date: NaiveDate,
    },
}

/// Result of an applied [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A user was created or updated.
    User(User),
    /// A project was created or updated.
    Project(Project),
    /// An announcement was posted.
    Announcement(Announcement),
    /// A feature request was created or updated.
    FeatureRequest(FeatureRequest),
    /// A task template was created.
    TaskTemplate(TaskTemplate),
    /// A task was created, with a best-effort risk hint.
    TaskCreated {
        /// New task.
        task: Task,
        /// Risk hint from the classifier, if any.
        risk_hint: Option<String>,
    },
    /// A task was updated.
    Task(Task),
    /// A task was deleted.
    TaskDeleted(TaskId),
    /// An allocation was created or updated.
    Allocation(TaskAllocation),
    /// An allocation was removed.
    AllocationRemoved(AllocationId),
    /// Planned allocations were marked missed.
    AllocationsMissed(Vec<TaskAllocation>),
    /// A focus session changed state.
    Focus(FocusStatus),
    /// A focus session was abandoned.
    FocusCancelled(AllocationId),
    /// A focus session was completed.
    FocusCompleted(Box<FocusOutcome>),
    /// A routine was created or updated.
    Routine(RoutineTemplate),
    /// A routine was deployed.
    Deployment(Deployment),
}
