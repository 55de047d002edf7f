//! Fixtures shared by the in-memory store tests.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, store_with};
use chronos::{
    classifier::adapters::KeywordClassifier,
    config::ChronosConfig,
    store::{ChronosStore, Command, CommandOutcome},
    focus::services::FocusStatus,
    directory::domain::UserId,
    task::domain::TaskId,
};
use rstest::fixture;

/// Store type used across the in-memory tests.
pub type TestStore = ChronosStore<KeywordClassifier, ManualClock>;

/// Store plus the clock driving it.
pub struct Harness {
    pub store: TestStore,
    pub clock: Arc<ManualClock>,
}

/// Provides a store with default configuration.
#[fixture]
pub fn harness() -> Harness {
    let (store, clock) = store_with(ChronosConfig::default(), KeywordClassifier::new());
    Harness { store, clock }
}

/// Starts a focus session and returns its status.
///
/// # Errors
///
/// Returns an error when the command fails or yields another outcome.
pub async fn start_focus(
    store: &TestStore,
    task_id: TaskId,
    user_id: UserId,
) -> Result<FocusStatus, eyre::Report> {
    match store
        .apply(Command::StartFocus { task_id, user_id })
        .await?
    {
        CommandOutcome::Focus(status) => Ok(status),
        other => Err(eyre::eyre!("expected focus status, got {other:?}")),
    }
}
