//! Record sequence serialization into a named slot.
//!
//! # Responsibility
//! - Save the full ordered record sequence as a JSON array.
//! - Load it back, degrading to an empty sequence on any failure.
//!
//! # Invariants
//! - `load(save(records)) == records` for any sequence, including empty.
//! - Log events carry counts and byte sizes only, never record contents.

use super::slot_store::SlotStore;
use super::PersistResult;
use crate::model::record::Record;
use log::{debug, warn};

/// Slot key used by the original browser storage layout.
pub const DEFAULT_SLOT_KEY: &str = "registros";

/// Saves and loads the record sequence through a [`SlotStore`].
pub struct RecordPersistence<S: SlotStore> {
    slots: S,
    key: String,
}

impl<S: SlotStore> RecordPersistence<S> {
    /// Creates an adapter writing to [`DEFAULT_SLOT_KEY`].
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Overwrites the slot with the serialized `records`.
    pub fn save(&self, records: &[Record]) -> PersistResult<()> {
        let payload = serde_json::to_string(records)?;
        self.slots.write_slot(self.key.as_str(), payload.as_str())?;
        debug!(
            "event=slot_save module=persist status=ok count={} bytes={}",
            records.len(),
            payload.len()
        );
        Ok(())
    }

    /// Reads the slot back into records.
    ///
    /// Returns an empty sequence when the slot is absent, unreadable or
    /// not a JSON record array.
    pub fn load(&self) -> Vec<Record> {
        let payload = match self.slots.read_slot(self.key.as_str()) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("event=slot_load module=persist status=ok count=0 slot=absent");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=persist status=error error_code=slot_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Record>>(payload.as_str()) {
            Ok(records) => {
                debug!(
                    "event=slot_load module=persist status=ok count={}",
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=persist status=error error_code=slot_decode_failed bytes={} error={}",
                    payload.len(),
                    err
                );
                Vec::new()
            }
        }
    }
}
