//! Unit tests for the allocation module.
