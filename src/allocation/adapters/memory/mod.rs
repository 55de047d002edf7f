//! In-memory allocation adapters.

mod allocation;

pub use allocation::InMemoryAllocationRepository;
