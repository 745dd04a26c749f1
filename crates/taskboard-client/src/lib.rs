//! Taskboard client
//!
//! Talks to the Taskboard REST API and keeps the client-side view of the
//! task list.
//!
//! - [`TaskApi`] / [`HttpTaskApi`]: the six REST operations over `reqwest`
//! - [`TaskBoard`]: task list, filter, draft and edit state driven by a `TaskApi`
//! - [`PostsExplorer`]: searchable, paginated view over a public posts feed

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod posts;

pub use api::{HttpTaskApi, TaskApi};
pub use board::{TaskBoard, TaskEdit};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use posts::{HttpPostSource, Post, PostSource, PostsExplorer};
