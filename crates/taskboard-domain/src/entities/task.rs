//! Task entity

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::input::{normalize_description, normalize_title, TaskChanges, TaskDraft};
use crate::errors::DomainResult;
use crate::value_objects::{Priority, TaskId};

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task from a validated draft
    ///
    /// Assigns a fresh id and sets both timestamps to the same instant.
    pub fn create(draft: TaskDraft) -> Self {
        let (title, description, priority, due_date) = draft.into_parts();
        let now = now();
        Self {
            id: TaskId::new(),
            title,
            description,
            completed: false,
            priority,
            due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, re-validating every provided field
    ///
    /// Nothing is modified when validation fails.
    pub fn apply(&mut self, changes: TaskChanges) -> DomainResult<()> {
        let title = changes.title.as_deref().map(normalize_title).transpose()?;
        let description = match changes.description {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(normalize_description(&raw)?),
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.touch();
        Ok(())
    }

    /// Changes that flip the completion flag
    pub fn toggle_changes(&self) -> TaskChanges {
        TaskChanges::completion(!self.completed)
    }

    /// Refresh `updated_at`, keeping it strictly increasing
    pub fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Current time at microsecond precision, the resolution stores keep
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskInput;

    fn task(title: &str) -> Task {
        Task::create(TaskDraft::new(title).unwrap())
    }

    #[test]
    fn test_create_sets_defaults() {
        let task = task("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(task("a").id, task("a").id);
    }

    #[test]
    fn test_apply_partial_changes() {
        let mut task = task("Write report");
        let created_at = task.created_at;
        let before = task.updated_at;

        task.apply(TaskChanges {
            priority: Some(Priority::High),
            description: Some(Some("  quarterly  ".to_string())),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description.as_deref(), Some("quarterly"));
        assert_eq!(task.created_at, created_at);
        assert!(task.updated_at > before);
    }

    #[test]
    fn test_apply_rejects_invalid_title_without_side_effects() {
        let mut task = task("Original");
        let snapshot = task.clone();

        let err = task
            .apply(TaskChanges {
                title: Some("x".repeat(201)),
                completed: Some(true),
                ..Default::default()
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(task, snapshot);
    }

    #[test]
    fn test_apply_clears_optional_fields() {
        let input = TaskInput {
            description: Some(Some("notes".to_string())),
            due_date: Some(Some("2030-01-01".to_string())),
            ..TaskInput::titled("t")
        };
        let mut task = Task::create(input.into_draft().unwrap());
        assert!(task.description.is_some());
        assert!(task.due_date.is_some());

        task.apply(TaskChanges {
            description: Some(None),
            due_date: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_double_toggle_restores_state_and_advances_timestamp() {
        let mut task = task("Toggle me");
        let t0 = task.updated_at;

        task.apply(task.toggle_changes()).unwrap();
        assert!(task.completed);
        let t1 = task.updated_at;

        task.apply(task.toggle_changes()).unwrap();
        assert!(!task.completed);
        let t2 = task.updated_at;

        assert!(t0 < t1 && t1 < t2);
        assert!(task.updated_at >= task.created_at);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let task = task("Shape");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["title"], "Shape");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["completed"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("description").is_none());
        assert!(value.get("dueDate").is_none());

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }
}
