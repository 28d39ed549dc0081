//! Request and Response models for the image server
//!
//! Request paths are validated into [`FileRequest`]s; the auxiliary
//! endpoints answer with JSON DTOs.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::FileRequest;
pub use responses::{HealthResponse, StatsResponse};
