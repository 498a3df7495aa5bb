//! services/api/src/web/state.rs
//!
//! Defines the application state shared by all handlers.

use crate::config::Config;
use mood_analysis_core::ports::TaskStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The analysis engine itself is stateless, so only the task source and
/// configuration live here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub config: Arc<Config>,
}
