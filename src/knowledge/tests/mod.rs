//! Unit tests for the knowledge base.
