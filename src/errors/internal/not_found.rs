use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("User not found: {0}")]
    User(i32),

    #[error("Request not found: {0}")]
    Request(i32),

    #[error("Comment not found: {0}")]
    Comment(i32),
}
