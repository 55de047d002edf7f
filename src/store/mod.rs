//! Task store with a command interface.
//!
//! [`ChronosStore`] owns the in-memory repositories and services of every
//! bounded context. Callers mutate state only through
//! [`ChronosStore::apply`], which performs cross-context checks (users
//! exist and are active, projects exist and are open) before delegating.

mod chronos;
mod command;
mod error;

pub use chronos::ChronosStore;
pub use command::{Command, CommandOutcome, TemplateInstance};
pub use error::{StoreError, StoreResult};

#[cfg(test)]
mod tests;
