//! In-memory routine adapters.

mod routine;

pub use routine::InMemoryRoutineRepository;
