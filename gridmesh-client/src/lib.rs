//! # GridMesh API Client
//!
//! Typed client library for the GridMesh batch-compute platform API.
//!
//! ## Modules
//!
//! - `client`: HTTP client wrapper for the platform's REST API
//! - `models`: Wire types (tasks, submissions, profiles)
//! - `error`: API error type shared by all operations

pub mod client;
pub mod error;
pub mod models;

// Re-export main types
pub use client::GridMeshClient;
pub use error::ApiError;
pub use models::profile::Profile;
pub use models::task::{Constant, Task, TaskSubmission, TaskSummary};
