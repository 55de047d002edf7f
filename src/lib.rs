//! Chronos: task and time management core for small teams.
//!
//! This crate provides the non-presentational core of the Chronos
//! application: a task store with a command interface, an allocation engine
//! for scheduled and actual work slots, a focus timer with its debrief flow,
//! dashboard aggregators, a routine instantiator, a knowledge base of
//! completed-task write-ups and the admin directory.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and classification
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   keyword classifier)
//!
//! # Modules
//!
//! - [`allocation`]: Planned and actual task execution slots
//! - [`classifier`]: Best-effort tag suggestions and risk hints
//! - [`config`]: Tunable limits and logging settings
//! - [`dashboard`]: Due buckets, hour totals and quadrant counts
//! - [`directory`]: Users, projects, announcements, feature requests and
//!   task templates
//! - [`focus`]: Focus timer and debrief
//! - [`knowledge`]: Write-ups of completed tasks
//! - [`routine`]: Recurring task templates and their deployment
//! - [`store`]: Command interface owning every aggregate
//! - [`task`]: Task records and lifecycle
//! - [`telemetry`]: Structured logging setup

pub mod allocation;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod focus;
pub mod knowledge;
pub mod routine;
pub mod store;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
