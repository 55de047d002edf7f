//! Allocation engine for scheduled and actual task execution slots.
//!
//! A [`domain::TaskAllocation`] records one attempt of a user on a task,
//! from a planned slot through running and paused states to its final
//! done, overrun or missed outcome. The accumulated seconds it carries are
//! the authoritative measure of time spent.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
