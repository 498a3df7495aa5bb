//! crates/mood_analysis_core/src/domain.rs
//!
//! Defines the core data structures of the mood analysis engine.
//! Wire names follow the producing client (camelCase), so the same types are
//! used at the Task Store boundary and in the serialized report.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::format_time;

//=========================================================================================
// Task Store Input
//=========================================================================================

/// How urgent the user marked a task. Carried through, never analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Priority {
    High,
    Low,
    #[default]
    Neutral,
}

impl Priority {
    /// Maps a stored or submitted label to a priority, ignoring case.
    /// Anything unrecognized is `Neutral`.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("high") {
            Self::High
        } else if label.eq_ignore_ascii_case("low") {
            Self::Low
        } else {
            Self::Neutral
        }
    }
}

/// A single logged activity, as handed over by the Task Store.
///
/// `start_time` and `finish_time` are kept as the raw `HH:MM` strings the user
/// submitted; parsing happens inside the engine so one bad record can be
/// reported instead of rejected at deserialization. For the same reason the
/// descriptive fields accept any JSON value: a missing, `null` or non-string
/// time becomes an empty string and an unknown priority becomes `Neutral`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub mood: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "priority_or_neutral")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub start_time: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub finish_time: String,
}

/// Any JSON value, keeping the text when it is a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Other(IgnoredAny),
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientText::deserialize(deserializer)? {
        LenientText::Text(text) => text,
        LenientText::Other(_) => String::new(),
    })
}

fn priority_or_neutral<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientText::deserialize(deserializer)? {
        LenientText::Text(label) => Priority::from_label(&label),
        LenientText::Other(_) => Priority::Neutral,
    })
}

//=========================================================================================
// Derived Engine Types
//=========================================================================================

/// A pair of minute-of-day values taken from one task.
///
/// `start_minute <= end_minute` is not guaranteed: a finish earlier than the
/// start is representable so the normalizer can reject it explicitly.
/// Field order gives the derived `Ord` its start-then-end sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeInterval {
    pub fn new(start_minute: u32, end_minute: u32) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// True unless the interval finishes before it starts.
    pub fn is_valid(&self) -> bool {
        self.start_minute <= self.end_minute
    }

    /// A zero-length interval marks a single logged moment.
    pub fn is_instant(&self) -> bool {
        self.start_minute == self.end_minute
    }

    /// Length in minutes, or `None` when the interval is inverted.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.end_minute.checked_sub(self.start_minute)
    }

    /// Renders the interval as a `("HH:MM", "HH:MM")` pair.
    pub fn to_range(&self) -> (String, String) {
        (format_time(self.start_minute), format_time(self.end_minute))
    }
}

/// The per-mood aggregation unit. Built fresh for every analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodBucket {
    pub mood: String,
    pub total_minutes: u64,
    pub intervals: Vec<TimeInterval>,
}

//=========================================================================================
// Report Output
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// A start or finish string was not a valid `HH:MM` time.
    MalformedTime,
    /// The finish time was earlier than the start time.
    InvalidInterval,
}

/// Advisory note about one task record that could not fully contribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskWarning {
    pub task_id: Option<i64>,
    pub mood: String,
    pub kind: WarningKind,
    pub message: String,
}

/// The final two-map artifact consumed by visualization, plus advisory warnings.
///
/// Both maps keep the aggregator's first-seen mood order and always share the
/// same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisReport {
    #[serde(rename = "totalMinutesData")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub total_minutes_by_mood: IndexMap<String, u64>,
    #[serde(rename = "timeRangesData")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub time_ranges_by_mood: IndexMap<String, Vec<(String, String)>>,
    #[serde(default)]
    pub warnings: Vec<TaskWarning>,
}

impl AnalysisReport {
    pub fn mood_count(&self) -> usize {
        self.total_minutes_by_mood.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_minutes_by_mood.is_empty() && self.time_ranges_by_mood.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
