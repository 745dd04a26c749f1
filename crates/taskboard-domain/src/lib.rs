//! Taskboard domain layer
//!
//! The task entity with its invariants, the validated input types that feed
//! it, and the store interface that infrastructure crates implement.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{Task, TaskChanges, TaskDraft, TaskInput};
pub use errors::{DomainError, DomainResult};
pub use repositories::TaskRepository;
pub use value_objects::{Priority, TaskFilter, TaskId};
