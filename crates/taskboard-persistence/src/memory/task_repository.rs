//! In-Memory Task Repository Implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use taskboard_domain::{
    DomainResult, Task, TaskChanges, TaskDraft, TaskFilter, TaskId, TaskRepository,
};

#[derive(Debug, Clone)]
struct StoredTask {
    /// Insertion sequence, breaks ties between equal `created_at` values
    seq: u64,
    task: Task,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: HashMap<TaskId, StoredTask>,
    next_seq: u64,
}

impl Inner {
    fn insert(&mut self, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(task.id, StoredTask { seq, task });
    }
}

/// Thread-safe in-memory implementation of TaskRepository
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Every operation holds the lock for its whole duration, so each call is
/// atomic with respect to the others; nothing spans calls.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    inner: RwLock<Inner>,
}

impl InMemoryTaskRepository {
    /// Create a new empty in-memory task repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial tasks, inserted in the given order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut inner = Inner::default();
        for task in tasks {
            inner.insert(task);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Get the current count of tasks
    pub fn count(&self) -> usize {
        self.inner.read().tasks.len()
    }

    /// Clear all tasks
    pub fn clear(&self) {
        self.inner.write().tasks.clear();
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> DomainResult<Task> {
        let task = Task::create(draft);
        debug!("Storing task {}", task.id);
        self.inner.write().insert(task.clone());
        Ok(task)
    }

    async fn find_many(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        let inner = self.inner.read();
        let mut matching: Vec<&StoredTask> = inner
            .tasks
            .values()
            .filter(|stored| filter.matches(stored.task.completed))
            .collect();

        matching.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(matching.into_iter().map(|stored| stored.task.clone()).collect())
    }

    async fn find_by_id(&self, id: &TaskId) -> DomainResult<Option<Task>> {
        Ok(self.inner.read().tasks.get(id).map(|stored| stored.task.clone()))
    }

    async fn update_by_id(
        &self,
        id: &TaskId,
        changes: TaskChanges,
    ) -> DomainResult<Option<Task>> {
        let mut inner = self.inner.write();
        let Some(stored) = inner.tasks.get_mut(id) else {
            return Ok(None);
        };
        stored.task.apply(changes)?;
        debug!("Updated task {}", id);
        Ok(Some(stored.task.clone()))
    }

    async fn delete_by_id(&self, id: &TaskId) -> DomainResult<bool> {
        let removed = self.inner.write().tasks.remove(id).is_some();
        if removed {
            debug!("Deleted task {}", id);
        }
        Ok(removed)
    }
}
