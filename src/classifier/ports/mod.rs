//! Port contracts for text classification services.

pub mod classifier;

pub use classifier::{ClassifierError, ClassifierResult, TagClassifier};
