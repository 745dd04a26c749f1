//! Client-side task board state
//!
//! `TaskBoard` mirrors what a task list screen holds: the tasks last
//! returned by the server, the active filter, the new-task draft and at most
//! one task in edit mode. Local state only changes after the server
//! confirms an operation; failures record a message and leave the list as
//! it was.

use std::sync::Arc;

use tracing::warn;

use taskboard_domain::{Task, TaskFilter, TaskId, TaskInput};

use crate::{api::TaskApi, error::Result};

pub const LOAD_FAILED: &str = "Failed to load tasks. Make sure the backend server is running.";
pub const CREATE_FAILED: &str = "Failed to create task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";

/// A task in edit mode together with its unsaved field values
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEdit {
    pub id: TaskId,
    pub input: TaskInput,
}

impl TaskEdit {
    fn of(task: &Task) -> Self {
        Self {
            id: task.id,
            input: TaskInput {
                title: Some(task.title.clone()),
                description: Some(task.description.clone()),
                priority: Some(task.priority.as_str().to_string()),
                due_date: Some(task.due_date.map(|d| d.format("%Y-%m-%d").to_string())),
                completed: Some(task.completed),
            },
        }
    }
}

/// Task list state driven by a [`TaskApi`]
pub struct TaskBoard {
    api: Arc<dyn TaskApi>,
    tasks: Vec<Task>,
    filter: TaskFilter,
    draft: TaskInput,
    editing: Option<TaskEdit>,
    loading: bool,
    error: Option<String>,
}

impl TaskBoard {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            filter: TaskFilter::All,
            draft: TaskInput::default(),
            editing: None,
            loading: false,
            error: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn draft(&self) -> &TaskInput {
        &self.draft
    }

    /// Mutable access to the new-task form
    pub fn draft_mut(&mut self) -> &mut TaskInput {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<&TaskEdit> {
        self.editing.as_ref()
    }

    /// Mutable access to the unsaved values of the task in edit mode
    pub fn edit_mut(&mut self) -> Option<&mut TaskInput> {
        self.editing.as_mut().map(|edit| &mut edit.input)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message describing the last failed operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Initial load
    pub async fn mount(&mut self) -> Result<()> {
        self.refresh().await
    }

    /// Switch filter and reload the list
    pub async fn set_filter(&mut self, filter: TaskFilter) -> Result<()> {
        self.filter = filter;
        self.refresh().await
    }

    /// Replace the local list with the server's view for the active filter
    pub async fn refresh(&mut self) -> Result<()> {
        self.loading = true;
        self.error = None;

        let result = self.api.list_tasks(self.filter).await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => Err(self.fail(LOAD_FAILED, e)),
        }
    }

    /// Submit the draft
    ///
    /// Returns `Ok(None)` without contacting the server when the draft title
    /// is blank.
    pub async fn submit_draft(&mut self) -> Result<Option<Task>> {
        let blank = self
            .draft
            .title
            .as_deref()
            .map_or(true, |title| title.trim().is_empty());
        if blank {
            return Ok(None);
        }

        match self.api.create_task(&self.draft).await {
            Ok(task) => {
                self.tasks.insert(0, task.clone());
                self.draft = TaskInput::default();
                Ok(Some(task))
            }
            Err(e) => Err(self.fail(CREATE_FAILED, e)),
        }
    }

    /// Put a task into edit mode, discarding any other unsaved edit
    ///
    /// Returns false when the task is not in the local list.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter().find(|task| task.id == *id) {
            Some(task) => {
                self.editing = Some(TaskEdit::of(task));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the task in edit mode as an update and leave edit mode
    ///
    /// On failure the edit stays open.
    pub async fn save_edit(&mut self) -> Result<Option<Task>> {
        let Some(edit) = self.editing.clone() else {
            return Ok(None);
        };

        let task = self.update(&edit.id, edit.input).await?;
        self.editing = None;
        Ok(Some(task))
    }

    /// Apply a partial update
    pub async fn update(&mut self, id: &TaskId, input: TaskInput) -> Result<Task> {
        match self.api.update_task(id, &input).await {
            Ok(task) => {
                self.replace(task.clone());
                Ok(task)
            }
            Err(e) => Err(self.fail(UPDATE_FAILED, e)),
        }
    }

    /// Flip completion of a task
    pub async fn toggle(&mut self, id: &TaskId) -> Result<Task> {
        match self.api.toggle_task(id).await {
            Ok(task) => {
                self.replace(task.clone());
                Ok(task)
            }
            Err(e) => Err(self.fail(UPDATE_FAILED, e)),
        }
    }

    pub async fn delete(&mut self, id: &TaskId) -> Result<()> {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != *id);
                if self.editing.as_ref().is_some_and(|edit| edit.id == *id) {
                    self.editing = None;
                }
                Ok(())
            }
            Err(e) => Err(self.fail(DELETE_FAILED, e)),
        }
    }

    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    fn fail(&mut self, message: &str, err: crate::error::ClientError) -> crate::error::ClientError {
        warn!("{}: {}", message, err);
        self.error = Some(message.to_string());
        err
    }
}
