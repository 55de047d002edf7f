//! Knowledge base of completed-task write-ups.
//!
//! Entries are recorded when a focus debrief opts into saving its reflection
//! and are rendered to Markdown with a `minijinja` template.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
