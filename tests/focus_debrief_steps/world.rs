//! Shared world state for focus debrief BDD scenarios.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::test_helpers::{ManualClock, store_with};
use async_trait::async_trait;
use chronos::{
    classifier::{
        adapters::KeywordClassifier,
        ports::{ClassifierError, ClassifierResult, TagClassifier},
    },
    config::ChronosConfig,
    directory::domain::UserId,
    focus::services::FocusStatus,
    store::{ChronosStore, CommandOutcome, StoreError},
    task::domain::Task,
};
use rstest::fixture;

/// Keyword classifier that can be taken offline mid-scenario.
#[derive(Debug, Default)]
pub struct SwitchableClassifier {
    offline: Arc<AtomicBool>,
    inner: KeywordClassifier,
}

impl SwitchableClassifier {
    fn ensure_online(&self) -> ClassifierResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClassifierError::Unavailable("service offline".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl TagClassifier for SwitchableClassifier {
    async fn suggest_tags(&self, text: &str) -> ClassifierResult<Vec<String>> {
        self.ensure_online()?;
        self.inner.suggest_tags(text).await
    }

    async fn assess_risk(&self, text: &str) -> ClassifierResult<Option<String>> {
        self.ensure_online()?;
        self.inner.assess_risk(text).await
    }
}

/// Store type used by the BDD world.
pub type TestStore = ChronosStore<SwitchableClassifier, ManualClock>;

/// Scenario world for focus debrief behaviour tests.
pub struct FocusWorld {
    pub store: TestStore,
    pub clock: Arc<ManualClock>,
    pub classifier_offline: Arc<AtomicBool>,
    pub user_id: Option<UserId>,
    pub task: Option<Task>,
    pub session: Option<FocusStatus>,
    pub last_debrief: Option<Result<CommandOutcome, StoreError>>,
}

impl FocusWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let classifier = SwitchableClassifier::default();
        let classifier_offline = Arc::clone(&classifier.offline);
        let (store, clock) = store_with(ChronosConfig::default(), classifier);
        Self {
            store,
            clock,
            classifier_offline,
            user_id: None,
            task: None,
            session: None,
            last_debrief: None,
        }
    }

    /// Returns the registered user.
    pub fn user_id(&self) -> Result<UserId, eyre::Report> {
        self.user_id
            .ok_or_else(|| eyre::eyre!("missing registered user in scenario world"))
    }

    /// Returns the task under test.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the focus session under test.
    pub fn session(&self) -> Result<&FocusStatus, eyre::Report> {
        self.session
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing focus session in scenario world"))
    }
}

impl Default for FocusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FocusWorld {
    FocusWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
