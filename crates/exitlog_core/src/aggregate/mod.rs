//! Derived read-only views over the record sequence.
//!
//! # Responsibility
//! - Compute per-person totals, top reasons and chart payloads.
//!
//! # Invariants
//! - All functions are pure over `&[Record]`; nothing is cached between
//!   mutations.
//! - Empty input yields empty results, never an error.

pub mod chart;
pub mod summary;
