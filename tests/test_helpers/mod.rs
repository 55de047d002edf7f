//! Shared clock and store fixtures for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use chronos::{
    classifier::ports::TagClassifier,
    config::ChronosConfig,
    directory::{domain::UserId, services::RegisterUserRequest},
    store::{ChronosStore, Command, CommandOutcome},
    task::{
        domain::{Task, TaskDetails},
        services::CreateTaskRequest,
    },
};
use mockable::Clock;

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += TimeDelta::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Monday 2025-03-10 09:00:00 UTC.
pub fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Builds a store over a fresh manual clock.
pub fn store_with<X: TagClassifier>(
    config: ChronosConfig,
    classifier: X,
) -> (ChronosStore<X, ManualClock>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(monday_morning()));
    let store = ChronosStore::new(config, Arc::new(classifier), Arc::clone(&clock));
    (store, clock)
}

/// Registers a user and returns their identifier.
///
/// # Errors
///
/// Returns an error when registration fails or yields another outcome.
pub async fn register<X: TagClassifier>(
    store: &ChronosStore<X, ManualClock>,
    name: &str,
) -> Result<UserId, eyre::Report> {
    let email = format!("{}@example.com", name.to_ascii_lowercase());
    match store
        .apply(Command::RegisterUser(RegisterUserRequest::new(name, email)))
        .await?
    {
        CommandOutcome::User(user) => Ok(user.id()),
        other => Err(eyre::eyre!("expected a registered user, got {other:?}")),
    }
}

/// Creates a task and returns it.
///
/// # Errors
///
/// Returns an error when creation fails or yields another outcome.
pub async fn create_task<X: TagClassifier>(
    store: &ChronosStore<X, ManualClock>,
    owner_id: UserId,
    details: TaskDetails,
) -> Result<Task, eyre::Report> {
    match store
        .apply(Command::CreateTask(CreateTaskRequest::new(owner_id, details)))
        .await?
    {
        CommandOutcome::TaskCreated { task, .. } => Ok(task),
        other => Err(eyre::eyre!("expected a created task, got {other:?}")),
    }
}
