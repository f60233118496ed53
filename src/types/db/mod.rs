// Database entities - SeaORM models
pub mod comment;
pub mod repair_request;
pub mod user;
