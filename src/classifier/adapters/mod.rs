//! Classifier adapters.

mod keyword;
mod unavailable;

pub use keyword::KeywordClassifier;
pub use unavailable::UnavailableClassifier;
