// Rust guideline compliant 2026-02-23

//! Adapters (secondary ports) for the `scrs` binary.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate, or selects between such implementations at runtime.

pub mod history_backend;
pub mod scorecard_model;
pub mod sqlite_history;
