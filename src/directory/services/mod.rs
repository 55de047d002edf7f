//! Application services for the directory and admin console.

mod directory;

pub use directory::{
    CreateProjectRequest, CreateTaskTemplateRequest, DirectoryError, DirectoryResult,
    DirectoryService, PostAnnouncementRequest, RegisterUserRequest,
};
