//! Port contracts for routine persistence.

pub mod repository;

pub use repository::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult};
