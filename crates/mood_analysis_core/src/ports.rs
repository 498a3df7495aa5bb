//! crates/mood_analysis_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the engine.
//! The engine never fetches data itself; adapters implementing these traits
//! hand it an immutable snapshot.

use async_trait::async_trait;

use crate::domain::TaskRecord;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("The backing service is unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task the user has logged, in the store's natural order.
    /// An unknown user has no tasks; that is an empty snapshot, not an error.
    async fn tasks_for_user(&self, user_id: i64) -> PortResult<Vec<TaskRecord>>;
}
