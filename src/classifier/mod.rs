//! Best-effort text classification.
//!
//! The classifier suggests tags for finished work and flags risky task
//! descriptions. Callers treat every failure as a soft miss and fall back
//! to an empty result.

pub mod adapters;
pub mod ports;
