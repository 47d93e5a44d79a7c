//! Domain model for the exit log.
//!
//! # Responsibility
//! - Define the canonical record shape used by store, persistence and views.
//!
//! # Invariants
//! - Every stored record is identified by a unique `RecordId`.
//! - Records are immutable once stored; removal is a hard delete.

pub mod record;
