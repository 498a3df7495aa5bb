pub mod aggregate;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod report;
pub mod time;

pub use aggregate::{aggregate, Aggregation};
pub use domain::{
    AnalysisReport, MoodBucket, Priority, TaskRecord, TaskWarning, TimeInterval, WarningKind,
};
pub use error::AnalysisError;
pub use normalize::{normalize, NormalizedIntervals};
pub use ports::{PortError, PortResult, TaskStore};
pub use report::{analyze, analyze_snapshot, build_report};
pub use time::{format_time, parse_time, MalformedTimeError, MINUTES_PER_DAY};
