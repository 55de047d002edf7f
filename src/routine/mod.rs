//! Routine templates and their on-demand deployment into tasks.
//!
//! A routine moves through draft, active, frozen and completed states.
//! Deployment is manual; rotating routines advance their assignee index
//! after every deployment.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
