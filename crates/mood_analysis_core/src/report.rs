//! crates/mood_analysis_core/src/report.rs
//!
//! Turns aggregated mood buckets into the serializable analysis report, and
//! provides the engine's top-level entry points.

use indexmap::IndexMap;
use tracing::debug;

use crate::aggregate::{aggregate, Aggregation};
use crate::domain::{AnalysisReport, TaskRecord, TimeInterval};
use crate::error::AnalysisError;

/// Builds the report from an aggregation.
///
/// Every bucket yields one entry in each map, in the aggregation's order.
/// Moods are not re-sorted here; display order is up to the caller.
pub fn build_report(aggregation: Aggregation) -> AnalysisReport {
    let mut total_minutes_by_mood = IndexMap::with_capacity(aggregation.buckets.len());
    let mut time_ranges_by_mood = IndexMap::with_capacity(aggregation.buckets.len());

    for (mood, bucket) in aggregation.buckets {
        let ranges: Vec<(String, String)> =
            bucket.intervals.iter().map(TimeInterval::to_range).collect();
        total_minutes_by_mood.insert(mood.clone(), bucket.total_minutes);
        time_ranges_by_mood.insert(mood, ranges);
    }

    AnalysisReport {
        total_minutes_by_mood,
        time_ranges_by_mood,
        warnings: aggregation.warnings,
    }
}

/// Runs a full analysis pass over one user's task snapshot.
pub fn analyze(tasks: &[TaskRecord]) -> AnalysisReport {
    let report = build_report(aggregate(tasks));
    debug!(
        tasks = tasks.len(),
        moods = report.mood_count(),
        warnings = report.warnings.len(),
        "analysis complete"
    );
    report
}

/// Like [`analyze`], but distinguishes an absent snapshot from an empty one.
pub fn analyze_snapshot(snapshot: Option<Vec<TaskRecord>>) -> Result<AnalysisReport, AnalysisError> {
    let tasks = snapshot.ok_or(AnalysisError::MissingSnapshot)?;
    Ok(analyze(&tasks))
}
