//! Task operations behind the HTTP handlers

use std::sync::Arc;

use tracing::{debug, info};

use taskboard_domain::{
    DomainError, DomainResult, Task, TaskFilter, TaskId, TaskInput, TaskRepository,
};

/// Application service coordinating validation and the task store
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    /// Create a service over `repository`
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// All tasks matching `filter`, newest first
    pub async fn list(&self, filter: TaskFilter) -> DomainResult<Vec<Task>> {
        debug!("Listing tasks with filter {}", filter);
        self.repository.find_many(filter).await
    }

    /// Fetch one task
    pub async fn get(&self, id: &str) -> DomainResult<Task> {
        let task_id = parse_id(id)?;
        self.repository
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))
    }

    /// Validate `input` against the create allow-list and store a new task
    pub async fn create(&self, input: TaskInput) -> DomainResult<Task> {
        let draft = input.into_draft()?;
        let task = self.repository.create(draft).await?;
        info!("Created task {}", task.id);
        Ok(task)
    }

    /// Apply the update allow-list of `input` to an existing task
    ///
    /// A missing task is reported before the input is validated.
    pub async fn update(&self, id: &str, input: TaskInput) -> DomainResult<Task> {
        let task_id = parse_id(id)?;
        if self.repository.find_by_id(&task_id).await?.is_none() {
            return Err(DomainError::task_not_found(id));
        }

        let changes = input.into_changes()?;
        let task = self
            .repository
            .update_by_id(&task_id, changes)
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))?;
        info!("Updated task {}", task.id);
        Ok(task)
    }

    /// Remove a task
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let task_id = parse_id(id)?;
        if !self.repository.delete_by_id(&task_id).await? {
            return Err(DomainError::task_not_found(id));
        }
        info!("Deleted task {}", task_id);
        Ok(())
    }

    /// Flip the completion flag of a task
    pub async fn toggle(&self, id: &str) -> DomainResult<Task> {
        let task_id = parse_id(id)?;
        let current = self
            .repository
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))?;

        let task = self
            .repository
            .update_by_id(&task_id, current.toggle_changes())
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))?;
        info!("Task {} completed={}", task.id, task.completed);
        Ok(task)
    }
}

// Ids that can never have been issued are reported as missing tasks.
fn parse_id(raw: &str) -> DomainResult<TaskId> {
    TaskId::from_string(raw).map_err(|_| DomainError::task_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_persistence::InMemoryTaskRepository;

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskRepository::new()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let task = service.create(TaskInput::titled("  Buy milk  ")).await.unwrap();
        assert_eq!(task.title, "Buy milk");

        let fetched = service.get(&task.id.to_string()).await.unwrap();
        assert_eq!(fetched, task);
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        let service = service();
        assert!(service.get("not-a-uuid").await.unwrap_err().is_not_found());
        assert!(service.toggle("123").await.unwrap_err().is_not_found());
        assert!(service.delete("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_task_reports_not_found_before_validation() {
        let service = service();
        let id = TaskId::new().to_string();
        let err = service
            .update(&id, TaskInput::titled(""))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_changes() {
        let service = service();
        let task = service.create(TaskInput::titled("Keep me")).await.unwrap();
        let err = service
            .update(&task.id.to_string(), TaskInput::titled("   "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(&task.id.to_string()).await.unwrap().title, "Keep me");
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_flag() {
        let service = service();
        let task = service.create(TaskInput::titled("Flip")).await.unwrap();
        let id = task.id.to_string();

        let once = service.toggle(&id).await.unwrap();
        assert!(once.completed);
        let twice = service.toggle(&id).await.unwrap();
        assert!(!twice.completed);
        assert!(task.updated_at < once.updated_at && once.updated_at < twice.updated_at);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let task = service.create(TaskInput::titled("Gone")).await.unwrap();
        let id = task.id.to_string();

        service.delete(&id).await.unwrap();
        assert!(service.delete(&id).await.unwrap_err().is_not_found());
        assert!(service.list(TaskFilter::All).await.unwrap().is_empty());
    }
}
