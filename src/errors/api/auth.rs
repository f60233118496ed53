use crate::errors::internal::{CredentialError, InternalError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Challenge returned with every 401
pub const BEARER_CHALLENGE: &str = "Bearer";

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid login or password
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(
        Json<AuthErrorResponse>,
        #[oai(header = "WWW-Authenticate")] String,
    ),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid login or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create an Unauthorized error carrying the bearer challenge
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AuthError::Unauthorized(
            Json(AuthErrorResponse {
                error: "unauthorized".to_string(),
                message: message.into(),
                status_code: 401,
            }),
            BEARER_CHALLENGE.to_string(),
        )
    }

    /// Create an InternalError with a generic message
    pub fn internal_server_error() -> Self {
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Convert InternalError to AuthError
    ///
    /// Credential failures keep their meaning; everything else is logged and
    /// collapsed into a generic 500.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                Self::unauthorized("Token has expired")
            }
            InternalError::Credential(_) => Self::unauthorized("Unauthorized: invalid token"),
            _ => {
                tracing::error!("Internal error in auth endpoint: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::Unauthorized(json, _) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
