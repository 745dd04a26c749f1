//! SurrealDB Repository Implementation
//!
//! ## Modes
//!
//! - **Embedded (Memory)**: In-memory, no persistence (testing/development)
//! - **Client (WebSocket)**: Remote server connection (production)
//!
//! ## Usage
//!
//! ```ignore
//! use taskboard_persistence::surreal::{SurrealConnection, SurrealTarget, SurrealTaskRepository};
//!
//! let conn = SurrealConnection::open(SurrealTarget::Embedded, "taskboard", "main").await?;
//! let task_repo = SurrealTaskRepository::new(conn).await?;
//! ```

pub mod connection;
pub mod task_repository;

pub use connection::{SharedConnection, SurrealClient, SurrealConnection, SurrealTarget};
pub use task_repository::SurrealTaskRepository;
