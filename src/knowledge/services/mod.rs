//! Application services for the knowledge base.

mod library;
mod writeup;

pub use library::{KnowledgeError, KnowledgeResult, KnowledgeService};
pub use writeup::{WRITE_UP_TEMPLATE, format_duration, render_write_up};
