//! Per-person and per-reason counts.

use crate::model::record::Record;
use std::collections::{BTreeMap, HashMap};

/// Number of reasons returned when callers do not pick a limit.
pub const DEFAULT_TOP_REASONS_LIMIT: usize = 5;

/// One reason bucket in [`top_reasons`] output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonCount {
    pub reason: String,
    pub count: usize,
}

/// Counts records per `name`.
///
/// Values always sum to `records.len()`.
pub fn counts_by_person(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Counts records per `name`, keeping first-appearance order of each name.
pub fn counts_by_person_ordered(records: &[Record]) -> Vec<(String, usize)> {
    tally_in_first_seen_order(records.iter().map(|record| record.name.as_str()))
}

/// Returns the `limit` most frequent reasons, highest count first.
///
/// # Invariants
/// - Equal counts keep the order in which each reason first occurs.
/// - Every returned count is at least 1.
pub fn top_reasons(records: &[Record], limit: usize) -> Vec<ReasonCount> {
    let mut buckets =
        tally_in_first_seen_order(records.iter().map(|record| record.reason.as_str()));
    // `sort_by` is stable, which is what carries the first-occurrence tie-break.
    buckets.sort_by(|(_, left), (_, right)| right.cmp(left));
    buckets
        .into_iter()
        .take(limit)
        .map(|(reason, count)| ReasonCount { reason, count })
        .collect()
}

fn tally_in_first_seen_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut tally: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match positions.get(key) {
            Some(&index) => tally[index].1 += 1,
            None => {
                positions.insert(key, tally.len());
                tally.push((key.to_string(), 1));
            }
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::tally_in_first_seen_order;

    #[test]
    fn tally_keeps_first_seen_order() {
        let tally = tally_in_first_seen_order(["b", "a", "b", "c", "a", "b"].into_iter());
        assert_eq!(
            tally,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }
}
