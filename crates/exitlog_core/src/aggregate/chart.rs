//! Bar-chart payload for the per-person summary.
//!
//! The chart widget itself lives outside the core; this module only shapes
//! the data it consumes.

use super::summary::counts_by_person_ordered;
use crate::model::record::Record;
use serde::Serialize;

pub const PERSON_CHART_TITLE: &str = "Exits per person";
pub const PERSON_CHART_DATASET_LABEL: &str = "Number of exits";

/// Chart kinds understood by render sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
}

/// Y axis options; counts are non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YAxis {
    pub begin_at_zero: bool,
    pub step_size: u32,
}

/// Render-ready chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    /// Person names, in order of first appearance in the store.
    pub labels: Vec<String>,
    /// Exit counts aligned with `labels`.
    pub values: Vec<usize>,
    pub y_axis: YAxis,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Builds the "exits per person" bar chart from current records.
pub fn person_chart(records: &[Record]) -> ChartData {
    let (labels, values) = counts_by_person_ordered(records).into_iter().unzip();
    ChartData {
        kind: ChartKind::Bar,
        title: PERSON_CHART_TITLE.to_string(),
        dataset_label: PERSON_CHART_DATASET_LABEL.to_string(),
        labels,
        values,
        y_axis: YAxis {
            begin_at_zero: true,
            step_size: 1,
        },
    }
}
