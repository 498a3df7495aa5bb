//! crates/mood_analysis_core/src/aggregate.rs
//!
//! Groups a user's task records by mood and computes per-mood totals and
//! interval lists. Problems with individual records become warnings; they
//! never stop the rest of the snapshot from being analyzed.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::domain::{MoodBucket, TaskRecord, TaskWarning, TimeInterval, WarningKind};
use crate::normalize::normalize;
use crate::time::{format_time, parse_time, MalformedTimeError};

/// Buckets keyed by mood in first-seen order, plus the per-task warnings
/// raised while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub buckets: IndexMap<String, MoodBucket>,
    pub warnings: Vec<TaskWarning>,
}

#[derive(Default)]
struct BucketBuilder {
    total_minutes: u64,
    raw: Vec<(usize, TimeInterval)>,
}

impl BucketBuilder {
    /// Records one parsed task. Only non-inverted intervals add to the total.
    fn record(&mut self, position: usize, interval: TimeInterval) {
        if let Some(minutes) = interval.duration_minutes() {
            self.total_minutes = self.total_minutes.saturating_add(u64::from(minutes));
        }
        self.raw.push((position, interval));
    }
}

/// Partitions `tasks` by exact mood label and builds one bucket per label.
///
/// Every mood that appears in the input gets a bucket, even when none of its
/// records could be parsed. Totals only count intervals that do not finish
/// before they start. Warnings come out in snapshot order.
pub fn aggregate(tasks: &[TaskRecord]) -> Aggregation {
    let mut builders: IndexMap<String, BucketBuilder> = IndexMap::new();
    let mut warnings: Vec<(usize, TaskWarning)> = Vec::new();

    for (position, task) in tasks.iter().enumerate() {
        let builder = builders.entry(task.mood.clone()).or_default();
        match parse_interval(task) {
            Ok(interval) => builder.record(position, interval),
            Err(message) => {
                warn!(task_id = ?task.id, mood = %task.mood, "{}", message);
                warnings.push((position, warning(task, WarningKind::MalformedTime, message)));
            }
        }
    }

    let mut buckets = IndexMap::with_capacity(builders.len());
    for (mood, builder) in builders {
        let normalized = normalize(builder.raw);
        for (position, interval) in normalized.rejected {
            let task = &tasks[position];
            let message = format!(
                "finish time {} is earlier than start time {}",
                format_time(interval.end_minute),
                format_time(interval.start_minute)
            );
            warn!(task_id = ?task.id, mood = %task.mood, "{}", message);
            warnings.push((position, warning(task, WarningKind::InvalidInterval, message)));
        }

        debug!(
            mood = %mood,
            total_minutes = builder.total_minutes,
            intervals = normalized.intervals.len(),
            "built mood bucket"
        );
        let bucket = MoodBucket {
            mood: mood.clone(),
            total_minutes: builder.total_minutes,
            intervals: normalized.intervals,
        };
        buckets.insert(mood, bucket);
    }

    warnings.sort_by_key(|(position, _)| *position);
    Aggregation {
        buckets,
        warnings: warnings.into_iter().map(|(_, w)| w).collect(),
    }
}

/// Parses both times of a task, reporting every field that failed.
fn parse_interval(task: &TaskRecord) -> Result<TimeInterval, String> {
    match (parse_time(&task.start_time), parse_time(&task.finish_time)) {
        (Ok(start), Ok(end)) => Ok(TimeInterval::new(start, end)),
        (start, end) => {
            let failures: Vec<String> = [("start time", start), ("finish time", end)]
                .into_iter()
                .filter_map(|(field, result)| {
                    result
                        .err()
                        .map(|err: MalformedTimeError| format!("{}: {}", field, err))
                })
                .collect();
            Err(failures.join("; "))
        }
    }
}

fn warning(task: &TaskRecord, kind: WarningKind, message: String) -> TaskWarning {
    TaskWarning {
        task_id: task.id,
        mood: task.mood.clone(),
        kind,
        message,
    }
}
