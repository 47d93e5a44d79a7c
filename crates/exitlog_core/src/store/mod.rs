//! In-memory record store.
//!
//! # Responsibility
//! - Own the ordered record collection and its id allocation.
//! - Answer name/date filter queries over current contents.
//!
//! # Invariants
//! - Record ids are unique within a store at all times.
//! - The store never persists itself; see `persist`.

pub mod record_store;
