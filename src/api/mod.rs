//! API Module
//!
//! HTTP handlers and routing for the image server.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /<any path>/<name>.<ext>` - Serve a file by base name

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
