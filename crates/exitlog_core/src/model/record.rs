//! Exit record domain model.
//!
//! # Responsibility
//! - Define the stored `Record` and the `NewRecord` candidate submitted by
//!   callers.
//! - Apply placeholder defaults for absent name/reason input.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused within one store.
//! - `name` and `reason` are never empty after defaulting.
//! - Serialized field names match the persisted slot layout
//!   (`id`, `nombre`, `fecha`, `hora`, `motivo`).

use serde::{Deserialize, Serialize};

/// Stable identifier for a stored record.
///
/// Values are Unix-epoch milliseconds at creation, bumped on collision.
pub type RecordId = i64;

/// Placeholder stored when a record is created without a name.
pub const DEFAULT_NAME: &str = "Anonymous";
/// Placeholder stored when a record is created without a reason.
pub const DEFAULT_REASON: &str = "Unspecified";

/// One exit-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    /// Person leaving.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Calendar date as entered (e.g. `2024-01-01`). Compared verbatim.
    #[serde(rename = "fecha")]
    pub date: String,
    /// Time of day as entered (e.g. `08:00`).
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "motivo")]
    pub reason: String,
}

impl Record {
    /// Returns whether this record still carries the default reason.
    pub fn has_default_reason(&self) -> bool {
        self.reason == DEFAULT_REASON
    }
}

/// Candidate submitted by the create-record action.
///
/// `name` and `reason` are optional; blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub name: Option<String>,
    pub date: String,
    pub time: String,
    pub reason: Option<String>,
}

impl NewRecord {
    /// Creates a candidate with only the mandatory date/time fields.
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: None,
            date: date.into(),
            time: time.into(),
            reason: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Materializes this candidate into a stored record with `id`.
    ///
    /// # Invariants
    /// - Blank or missing `name` becomes [`DEFAULT_NAME`].
    /// - Blank or missing `reason` becomes [`DEFAULT_REASON`].
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            name: or_default(self.name, DEFAULT_NAME),
            date: self.date,
            time: self.time,
            reason: or_default(self.reason, DEFAULT_REASON),
        }
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => fallback.to_string(),
    }
}
