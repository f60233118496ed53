use thiserror::Error;

/// Authentication failures: bad login, or a bearer token that cannot be trusted
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired token")]
    ExpiredToken,

    /// Token verified but its subject no longer resolves to a user
    #[error("Unknown token subject: {subject}")]
    UnknownSubject { subject: String },
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
