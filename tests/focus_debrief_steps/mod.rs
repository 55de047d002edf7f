//! Step definitions for focus debrief scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
