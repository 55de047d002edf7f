//! Adapter implementations for allocation ports.

pub mod memory;
