//! Persistence adapter for the record store.
//!
//! # Responsibility
//! - Define the key-value slot contract and its SQLite/in-memory backends.
//! - Serialize the full ordered record sequence into one slot.
//!
//! # Invariants
//! - This is the only layer touching durable storage.
//! - `load` fails soft: unreadable or malformed slots yield an empty sequence.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod record_persistence;
pub mod slot_store;

pub type PersistResult<T> = Result<T, PersistError>;

/// Error raised by slot reads/writes and record serialization.
#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Backend refused the operation (used by in-memory fault injection).
    Unavailable(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "invalid slot payload: {err}"),
            Self::Unavailable(message) => write!(f, "slot unavailable: {message}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
