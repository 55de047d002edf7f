//! Unit tests for routine templates.
