// Recipebook - social recipe-sharing backend

// HTTP boundary: routes and DTO mapping
pub mod api;

// Bearer-token authentication and the authorization predicate
pub mod auth;

// Data-access layer over PostgreSQL
pub mod store;

// Use-case command/query handlers
pub mod services;

// Row types for the relational schema
pub mod models;

// Common utilities
pub mod app_state;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use error::{ApiError, ApiResult};
