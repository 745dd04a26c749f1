//! Taskboard Persistence Layer
//!
//! Implementations of the `TaskRepository` store interface defined in
//! `taskboard-domain`.
//!
//! ## Backends
//!
//! - **In-Memory**: `parking_lot`-guarded map, used by default and in tests
//! - **SurrealDB**: embedded in-memory engine or a remote server over
//!   WebSocket, behind the `surrealdb-backend` feature
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskboard_domain::TaskRepository;
//! use taskboard_persistence::InMemoryTaskRepository;
//!
//! let repo: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
//! ```
//!
//! ```ignore
//! use taskboard_persistence::surreal::{SurrealConnection, SurrealTarget, SurrealTaskRepository};
//!
//! let target = SurrealTarget::Remote {
//!     url: "ws://localhost:8000".into(),
//!     username: "root".into(),
//!     password: "secret".into(),
//! };
//! let conn = SurrealConnection::open(target, "taskboard", "main").await?;
//! let repo: Arc<dyn TaskRepository> = Arc::new(SurrealTaskRepository::new(conn).await?);
//! ```

pub mod error;
pub mod memory;

#[cfg(feature = "surrealdb-backend")]
pub mod surreal;

pub use error::PersistenceError;
pub use memory::InMemoryTaskRepository;

#[cfg(feature = "surrealdb-backend")]
pub use surreal::{SharedConnection, SurrealConnection, SurrealTarget, SurrealTaskRepository};
