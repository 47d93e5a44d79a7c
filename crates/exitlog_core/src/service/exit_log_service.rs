//! Exit log orchestrator.
//!
//! # Responsibility
//! - Hydrate the store at startup and push the first render.
//! - Run the add and remove flows in a fixed step order.
//! - Answer summary queries from current state.
//!
//! # Invariants
//! - Step order per flow: mutate, persist, render list, render chart, then
//!   (add only) remote notify and form reset.
//! - A failure in a later step never undoes an earlier one.
//! - Failures are logged here and never propagated to the caller.

use crate::aggregate::chart::person_chart;
use crate::aggregate::summary::{counts_by_person, top_reasons, ReasonCount};
use crate::config::RemoteConfig;
use crate::latency::{Pacer, Step};
use crate::model::record::{NewRecord, Record, RecordId};
use crate::persist::record_persistence::RecordPersistence;
use crate::persist::slot_store::SlotStore;
use crate::remote::{DemoInfo, RemoteSync};
use crate::render::{record_views, RenderSink};
use crate::store::record_store::RecordStore;
use log::{info, warn};
use std::collections::BTreeMap;
use std::time::Instant;

/// Which remote demo resources to fetch at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoRequest {
    pub user_id: u32,
    pub posts_limit: u32,
}

impl Default for DemoRequest {
    fn default() -> Self {
        Self {
            user_id: 1,
            posts_limit: 5,
        }
    }
}

impl From<&RemoteConfig> for DemoRequest {
    fn from(value: &RemoteConfig) -> Self {
        Self {
            user_id: value.demo_user_id,
            posts_limit: value.demo_posts_limit,
        }
    }
}

/// Application orchestrator owning the record store.
pub struct ExitLogService<S: SlotStore, K: RenderSink, R: RemoteSync> {
    store: RecordStore,
    persistence: RecordPersistence<S>,
    sink: K,
    remote: R,
    pacer: Pacer,
    demo: DemoRequest,
}

impl<S: SlotStore, K: RenderSink, R: RemoteSync> ExitLogService<S, K, R> {
    /// Creates an orchestrator over an empty store with no pacing.
    pub fn new(persistence: RecordPersistence<S>, sink: K, remote: R) -> Self {
        Self::with_store(RecordStore::new(), persistence, sink, remote)
    }

    /// Creates an orchestrator over a caller-provided (usually empty) store.
    pub fn with_store(
        store: RecordStore,
        persistence: RecordPersistence<S>,
        sink: K,
        remote: R,
    ) -> Self {
        Self {
            store,
            persistence,
            sink,
            remote,
            pacer: Pacer::immediate(),
            demo: DemoRequest::default(),
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_demo_request(mut self, demo: DemoRequest) -> Self {
        self.demo = demo;
        self
    }

    /// Loads persisted records and pushes the initial render.
    ///
    /// # Side effects
    /// - Replaces store contents with the persisted slot (empty on failure).
    /// - Renders list and chart, then fetches and renders demo info.
    pub fn initialize(&mut self) {
        let started_at = Instant::now();
        self.pacer.pause(Step::Load);
        let records = self.persistence.load();
        self.store.hydrate(records);
        self.render_list();
        self.render_chart();
        self.show_demo_info();
        info!(
            "event=app_init module=service status=ok count={} duration_ms={}",
            self.store.len(),
            started_at.elapsed().as_millis()
        );
    }

    /// Runs the create-record flow and returns the stored record.
    pub fn add_record(&mut self, candidate: NewRecord) -> Record {
        self.pacer.pause(Step::Add);
        let record = self.store.add(candidate);
        self.persist("add");
        self.render_list();
        self.render_chart();
        self.remote.notify_created(&record);
        self.sink.clear_form();
        info!(
            "event=record_add module=service status=ok record_id={} count={}",
            record.id,
            self.store.len()
        );
        record
    }

    /// Runs the delete-record flow. Returns whether a record was removed.
    ///
    /// The slot is rewritten and views refreshed even when `id` is absent.
    pub fn remove_record(&mut self, id: RecordId) -> bool {
        self.pacer.pause(Step::Remove);
        let removed = self.store.remove(id);
        self.persist("remove");
        self.render_list();
        self.render_chart();
        info!(
            "event=record_remove module=service status=ok record_id={} removed={} count={}",
            id,
            removed,
            self.store.len()
        );
        removed
    }

    /// Current records in insertion order.
    pub fn records(&self) -> &[Record] {
        self.store.list()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Case-insensitive name search; an empty needle returns all records.
    pub fn search_by_name(&self, needle: &str) -> Vec<Record> {
        self.pacer.pause(Step::NameSearch);
        self.store.find_by_name(needle)
    }

    /// Records whose date equals `date` exactly.
    pub fn records_on(&self, date: &str) -> Vec<Record> {
        self.pacer.pause(Step::DateFilter);
        self.store.find_by_date(date)
    }

    pub fn counts_by_person(&self) -> BTreeMap<String, usize> {
        self.pacer.pause(Step::PersonTotals);
        counts_by_person(self.store.list())
    }

    pub fn top_reasons(&self, limit: usize) -> Vec<ReasonCount> {
        self.pacer.pause(Step::TopReasons);
        top_reasons(self.store.list(), limit)
    }

    fn persist(&self, flow: &str) {
        self.pacer.pause(Step::Persist);
        if let Err(err) = self.persistence.save(self.store.list()) {
            warn!(
                "event=slot_save module=service status=error flow={} count={} error={}",
                flow,
                self.store.len(),
                err
            );
        }
    }

    fn render_list(&mut self) {
        self.pacer.pause(Step::Render);
        let rows = record_views(self.store.list());
        self.sink.render_records(&rows);
    }

    fn render_chart(&mut self) {
        let chart = person_chart(self.store.list());
        self.sink.render_chart(&chart);
    }

    fn show_demo_info(&mut self) {
        let user = match self.remote.fetch_user(self.demo.user_id) {
            Ok(user) => user,
            Err(err) => {
                warn!(
                    "event=demo_info module=service status=error stage=user user_id={} error={}",
                    self.demo.user_id, err
                );
                return;
            }
        };

        let posts = match self.remote.fetch_recent_posts(self.demo.posts_limit) {
            Ok(posts) => posts,
            Err(err) => {
                warn!(
                    "event=demo_info module=service status=degraded stage=posts error={}",
                    err
                );
                Vec::new()
            }
        };

        let info = DemoInfo { user, posts };
        self.sink.render_demo_info(&info);
    }
}
