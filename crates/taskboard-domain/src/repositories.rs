//! Repository interface for task persistence
//!
//! Storage engines implement this contract; the service layer only ever sees
//! `Arc<dyn TaskRepository>`.

use async_trait::async_trait;

use crate::{
    entities::{Task, TaskChanges, TaskDraft},
    errors::DomainResult,
    value_objects::{TaskFilter, TaskId},
};

/// Store for task entities
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task built from a validated draft
    ///
    /// The store assigns the id and both timestamps.
    async fn create(&self, draft: TaskDraft) -> DomainResult<Task>;

    /// Tasks matching the filter, newest `created_at` first
    async fn find_many(&self, filter: TaskFilter) -> DomainResult<Vec<Task>>;

    /// Find task by ID
    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>>;

    /// Apply changes and return the updated task, or `None` if absent
    async fn update_by_id(&self, id: &TaskId, changes: TaskChanges)
        -> DomainResult<Option<Task>>;

    /// Remove a task; `false` if it did not exist
    async fn delete_by_id(&self, id: &TaskId) -> DomainResult<bool>;
}
