//! Unit tests for the task module.

mod budget_tests;
mod state_transition_tests;
