//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use taskboard_domain::TaskRepository;

use crate::service::TaskService;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Task operations
    pub tasks: Arc<TaskService>,
    /// Name of the storage backend, reported by `/health`
    pub storage: &'static str,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state over a task store
    pub fn new(repository: Arc<dyn TaskRepository>, storage: &'static str) -> Self {
        Self {
            tasks: Arc::new(TaskService::new(repository)),
            storage,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
