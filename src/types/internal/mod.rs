// Internal types - never exposed over HTTP
pub mod auth;
pub mod comment;
pub mod context;
pub mod page;
pub mod repair;
pub mod user;
