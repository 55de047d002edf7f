//! Domain model for the knowledge base.

mod entry;
mod ids;

pub use entry::{KnowledgeEntry, WriteUp};
pub use ids::KnowledgeEntryId;
