// DTO layer - request and response bodies of the HTTP API
pub mod auth;
pub mod client;
pub mod comment;
pub mod common;
pub mod request;
pub mod stats;
pub mod user;
