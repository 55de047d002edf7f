//! In-memory directory adapters.

mod directory;

pub use directory::InMemoryDirectoryRepository;
