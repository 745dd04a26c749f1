//! In-Memory Repository Implementations
//!
//! Thread-safe in-memory implementation of the task store.
//! Suitable for testing and development.

mod task_repository;

pub use task_repository::InMemoryTaskRepository;
