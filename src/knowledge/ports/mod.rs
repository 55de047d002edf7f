//! Port contracts for knowledge base persistence.

pub mod repository;

pub use repository::{KnowledgeRepository, KnowledgeRepositoryError, KnowledgeRepositoryResult};
