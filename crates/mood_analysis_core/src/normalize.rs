//! crates/mood_analysis_core/src/normalize.rs
//!
//! Cleans up the raw intervals of a single mood for timeline visualization.

use crate::domain::TimeInterval;

/// Result of normalizing one mood's intervals.
///
/// `K` identifies where each raw interval came from (the aggregator uses the
/// task's position in the snapshot) so rejected entries can be traced back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIntervals<K> {
    /// Valid intervals sorted by start then end, exact duplicates removed.
    pub intervals: Vec<TimeInterval>,
    /// Intervals that finish before they start, with their keys, in input order.
    pub rejected: Vec<(K, TimeInterval)>,
}

/// Sorts and deduplicates a mood's intervals.
///
/// Zero-length intervals are kept as point markers. Overlapping intervals are
/// not merged: each logged occurrence stays a separate entry. Inverted
/// intervals are never reinterpreted as crossing midnight; they are returned
/// in `rejected` for the caller to report.
pub fn normalize<K, I>(raw: I) -> NormalizedIntervals<K>
where
    I: IntoIterator<Item = (K, TimeInterval)>,
{
    let mut intervals = Vec::new();
    let mut rejected = Vec::new();
    for (key, interval) in raw {
        if interval.is_valid() {
            intervals.push(interval);
        } else {
            rejected.push((key, interval));
        }
    }

    intervals.sort_unstable();
    intervals.dedup();

    NormalizedIntervals {
        intervals,
        rejected,
    }
}
