//! Unit tests for the focus module.

mod timer_tests;
