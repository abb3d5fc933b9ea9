/// Post Service Library
///
/// A small social backend: authenticated users create text posts with tags,
/// list them paginated and sorted (newest or most-liked), like/unlike them,
/// and delete their own posts. User identity is owned by an external
/// identity service; this service only validates its bearer tokens.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and response shaping
/// - `models`: Data structures for posts and authors
/// - `services`: Business logic layer (the post store)
/// - `db`: Database pool construction
/// - `middleware`: Bearer-token authentication
/// - `jwt`: Token validation helpers
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
