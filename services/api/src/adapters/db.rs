//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `TaskStore` port from the `core` crate. It only reads from the `tasks`
//! table; the schema is owned by the task service that writes it.

use async_trait::async_trait;
use mood_analysis_core::domain::{Priority, TaskRecord};
use mood_analysis_core::ports::{PortError, PortResult, TaskStore};
use sqlx::{FromRow, PgPool};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `TaskStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    mood: String,
    title: String,
    description: Option<String>,
    priority: Option<String>,
    start_time: String,
    finish_time: String,
}

impl TaskRow {
    fn to_domain(self) -> TaskRecord {
        TaskRecord {
            id: Some(self.id),
            user_id: self.user_id,
            mood: self.mood,
            title: self.title,
            description: self.description.unwrap_or_default(),
            priority: self
                .priority
                .as_deref()
                .map_or(Priority::Neutral, Priority::from_label),
            start_time: self.start_time,
            finish_time: self.finish_time,
        }
    }
}

fn port_error(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            PortError::Unavailable(e.to_string())
        }
        _ => PortError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// `TaskStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl TaskStore for DbAdapter {
    async fn tasks_for_user(&self, user_id: i64) -> PortResult<Vec<TaskRecord>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, user_id, mood, title, description, priority, start_time, finish_time \
             FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(port_error)?;

        debug!(user_id, rows = rows.len(), "loaded task snapshot");
        Ok(rows.into_iter().map(TaskRow::to_domain).collect())
    }
}
