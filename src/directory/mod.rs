//! Team directory and admin console records.
//!
//! Users, projects, announcements, feature requests and task templates are
//! flat records. The module follows the same layout as the task context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
