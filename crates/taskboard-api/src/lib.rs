#![warn(missing_docs)]

//! Taskboard RESTful API
//!
//! REST endpoints for creating, listing, filtering, editing, completing and
//! deleting tasks. Every response is wrapped in the uniform envelope
//! `{ success, data?, count?, message?, error? }`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;

pub use server::ApiServer;
pub use service::TaskService;
pub use state::AppState;
