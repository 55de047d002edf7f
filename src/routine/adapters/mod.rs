//! Adapter implementations for routine ports.

pub mod memory;
