//! Core domain logic for the exit log.
//! This crate is the single source of truth for record invariants.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod latency;
pub mod logging;
pub mod model;
pub mod persist;
pub mod remote;
pub mod render;
pub mod service;
pub mod store;

pub use aggregate::chart::{person_chart, ChartData, ChartKind, YAxis};
pub use aggregate::summary::{
    counts_by_person, top_reasons, ReasonCount, DEFAULT_TOP_REASONS_LIMIT,
};
pub use config::{AppConfig, ConfigError, LatencyConfig, LoggingConfig, RemoteConfig};
pub use latency::{Pacer, Step};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::record::{NewRecord, Record, RecordId, DEFAULT_NAME, DEFAULT_REASON};
pub use persist::record_persistence::{RecordPersistence, DEFAULT_SLOT_KEY};
pub use persist::slot_store::{MemorySlotStore, SlotStore, SqliteSlotStore};
pub use persist::{PersistError, PersistResult};
pub use remote::{
    DemoInfo, DisabledRemoteSync, HttpRemoteSync, RemoteError, RemotePost, RemoteResult,
    RemoteSync, RemoteUser,
};
pub use render::{record_views, RecordView, RenderSink};
pub use service::exit_log_service::{DemoRequest, ExitLogService};
pub use store::record_store::{IdClock, RecordStore, SystemClock};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
