//! Unit tests for the directory context.

mod domain_tests;
