use thiserror::Error;

/// Malformed or inconsistent input, surfaced to the caller verbatim
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Login already exists: {0}")]
    DuplicateLogin(String),

    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A foreign key in the payload points at nothing
    #[error("{field} {id} does not exist")]
    MissingReference { field: &'static str, id: i32 },

    #[error("Field '{field}' must be at most {max}")]
    OutOfRange { field: &'static str, max: u64 },
}

impl ValidationError {
    pub fn missing_reference(field: &'static str, id: i32) -> Self {
        Self::MissingReference { field, id }
    }

    /// Reject blank strings for required text fields
    pub fn require_text(field: &'static str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::EmptyField { field });
        }
        Ok(())
    }
}
