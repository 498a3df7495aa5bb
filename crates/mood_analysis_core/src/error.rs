//! crates/mood_analysis_core/src/error.rs
//!
//! Structural failures of an analysis request. Problems with individual task
//! records are never errors; they surface as report warnings instead.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No snapshot was supplied at all, as opposed to an empty one.
    #[error("No task snapshot was supplied for analysis")]
    MissingSnapshot,
}
