//! Unit tests for the command store.

mod command_tests;
mod reference_tests;

use crate::classifier::ports::TagClassifier;
use crate::directory::{domain::UserId, services::RegisterUserRequest};
use crate::store::{ChronosStore, Command, CommandOutcome};
use crate::task::{
    domain::{Task, TaskDetails, TimeBudget},
    services::CreateTaskRequest,
};
use crate::test_support::ManualClock;

/// Registers a user and returns their identifier.
async fn register<X: TagClassifier>(
    store: &ChronosStore<X, ManualClock>,
    name: &str,
) -> UserId {
    let email = format!("{}@example.com", name.to_ascii_lowercase());
    match store
        .apply(Command::RegisterUser(RegisterUserRequest::new(name, email)))
        .await
    {
        Ok(CommandOutcome::User(user)) => user.id(),
        other => panic!("expected a registered user, got {other:?}"),
    }
}

/// Creates a task through the command interface.
async fn create_task<X: TagClassifier>(
    store: &ChronosStore<X, ManualClock>,
    owner_id: UserId,
    details: TaskDetails,
) -> (Task, Option<String>) {
    match store
        .apply(Command::CreateTask(CreateTaskRequest::new(owner_id, details)))
        .await
    {
        Ok(CommandOutcome::TaskCreated { task, risk_hint }) => (task, risk_hint),
        other => panic!("expected a created task, got {other:?}"),
    }
}

/// Plain details with a thirty minute budget.
fn details(title: &str) -> TaskDetails {
    TaskDetails::new(title, TimeBudget::minutes(30).expect("budget")).expect("valid details")
}
