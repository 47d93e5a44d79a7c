//! Rendering boundary.
//!
//! # Responsibility
//! - Define the sink contract the orchestrator pushes current state into.
//! - Shape per-record list rows, including the delete affordance.
//!
//! # Invariants
//! - Sinks only consume state; they never mutate the store.
//! - Views are rebuilt from the store on every call.

use crate::aggregate::chart::ChartData;
use crate::model::record::{Record, RecordId};
use crate::remote::DemoInfo;

/// Text shown by sinks when the list is empty.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No records";

/// Delete affordance label for records still carrying the default reason.
pub const REMOVE_LABEL: &str = "Remove";
/// Delete affordance label for records with an explicit reason.
pub const DELETE_LABEL: &str = "Delete";

/// Consumer of the current list, chart and demo panel.
pub trait RenderSink {
    /// Replaces the displayed list. An empty slice means "show placeholder".
    fn render_records(&mut self, rows: &[RecordView]);
    /// Replaces the displayed chart.
    fn render_chart(&mut self, chart: &ChartData);
    /// Shows demo data fetched from the remote service.
    fn render_demo_info(&mut self, info: &DemoInfo);
    /// Resets the create-record input form.
    fn clear_form(&mut self);
}

/// One list row with its delete action keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub id: RecordId,
    pub name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub delete_label: &'static str,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            date: record.date.clone(),
            time: record.time.clone(),
            reason: record.reason.clone(),
            delete_label: if record.has_default_reason() {
                REMOVE_LABEL
            } else {
                DELETE_LABEL
            },
        }
    }
}

/// Builds list rows in store order.
pub fn record_views(records: &[Record]) -> Vec<RecordView> {
    records.iter().map(RecordView::from).collect()
}
