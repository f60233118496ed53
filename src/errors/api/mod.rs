// API-facing error types
pub mod auth;
pub mod service;

// Re-exports for convenience
pub use auth::AuthError;
pub use service::ServiceError;

#[cfg(test)]
mod auth_test;
