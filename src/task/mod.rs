//! Task records and their lifecycle.
//!
//! Tasks carry a typed time budget, a goal category and a status that moves
//! forward from `todo` through `doing`, `submitted` and `done` to
//! `archived`. Rejecting a submission and reopening finished work are the
//! only backward moves. The module follows hexagonal architecture:
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
