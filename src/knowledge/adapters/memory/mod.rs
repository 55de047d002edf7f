//! In-memory knowledge base adapters.

mod entry;

pub use entry::InMemoryKnowledgeRepository;
