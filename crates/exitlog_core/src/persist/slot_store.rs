//! Key-value slot backends.
//!
//! # Invariants
//! - `write_slot` replaces the whole value in one statement; readers never
//!   observe a partial write.

use super::{PersistError, PersistResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Durable single-value-per-key storage.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> PersistResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> PersistResult<()> {
        (**self).write_slot(key, value)
    }
}

/// SQLite-backed slot store over the `kv_slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot store with optional fault injection.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw slot value, bypassing serialization.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.borrow_mut().insert(key.into(), value.into());
    }

    /// Returns the raw slot value, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(PersistError::Unavailable(format!("read of `{key}` refused")));
        }
        Ok(self.raw(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> PersistResult<()> {
        if self.fail_writes.get() {
            return Err(PersistError::Unavailable(format!("write of `{key}` refused")));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
