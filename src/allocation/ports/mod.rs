//! Port contracts for allocation persistence.

pub mod repository;

pub use repository::{AllocationRepository, AllocationRepositoryError, AllocationRepositoryResult};
