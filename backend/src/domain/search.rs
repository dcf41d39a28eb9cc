//! In-memory search over aggregated rows.
//!
//! Pure, synchronous functions over an immutable snapshot of joined rows;
//! the only I/O in the pipeline is the aggregation fetch that produced the
//! rows.

use std::collections::BTreeSet;

use super::records::JoinedRow;

/// Distinct, lower-cased animal names across the given rows.
///
/// Membership is always a subset of the animal names present in `rows` at
/// computation time; recompute whenever the underlying rows change.
pub fn build_index<R>(rows: &[JoinedRow<R>]) -> BTreeSet<String> {
    rows.iter()
        .map(|row| row.animal_name.to_lowercase())
        .collect()
}

/// Rows whose animal name contains `query` as a case-insensitive substring.
///
/// An empty query matches every row. The filter is stable: surviving rows
/// keep their input order.
pub fn search<R: Clone>(rows: &[JoinedRow<R>], query: &str) -> Vec<JoinedRow<R>> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row.animal_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
