//! Focus timer and debrief flow.
//!
//! [`domain::FocusTimer`] is a pure stopwatch driven by caller-supplied
//! timestamps. [`services::FocusSessionService`] binds a timer to a running
//! allocation and turns the closing debrief into a completed task, a final
//! allocation record and, optionally, a knowledge base entry.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
