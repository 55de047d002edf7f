//! Adapter implementations for knowledge base ports.

pub mod memory;
