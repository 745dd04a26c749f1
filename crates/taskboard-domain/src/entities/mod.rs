//! Core domain entities with business logic and validation

mod input;
mod task;

pub use input::{TaskChanges, TaskDraft, TaskInput, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
pub use task::Task;
