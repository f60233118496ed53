use crate::errors::api::auth::BEARER_CHALLENGE;
use crate::errors::internal::{CredentialError, InternalError, ValidationError};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for service-center resource endpoints
#[derive(Object, Debug)]
pub struct ServiceErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Errors returned by the users, requests, comments, client and qr endpoints
#[derive(ApiResponse, Debug)]
pub enum ServiceError {
    /// Malformed input or a broken reference
    #[oai(status = 400)]
    BadRequest(Json<ServiceErrorResponse>),

    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(
        Json<ServiceErrorResponse>,
        #[oai(header = "WWW-Authenticate")] String,
    ),

    /// Caller's role may not perform the operation
    #[oai(status = 403)]
    Forbidden(Json<ServiceErrorResponse>),

    /// Row does not exist
    #[oai(status = 404)]
    NotFound(Json<ServiceErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ServiceErrorResponse>),
}

impl ServiceError {
    fn body(error: &str, message: String, status_code: u16) -> Json<ServiceErrorResponse> {
        Json(ServiceErrorResponse {
            error: error.to_string(),
            message,
            status_code,
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(Self::body("validation_failed", message.into(), 400))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(
            Self::body("unauthorized", message.into(), 401),
            BEARER_CHALLENGE.to_string(),
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ServiceError::Forbidden(Self::body("forbidden", message.into(), 403))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(Self::body("not_found", message.into(), 404))
    }

    pub fn internal_server_error() -> Self {
        ServiceError::InternalError(Self::body(
            "internal_error",
            "An internal error occurred".to_string(),
            500,
        ))
    }

    /// Convert InternalError to ServiceError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) => {
                tracing::error!("Database failure: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                Self::unauthorized("Token has expired")
            }
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                Self::unauthorized("Invalid login or password")
            }
            InternalError::Credential(_) => Self::unauthorized("Unauthorized: invalid token"),
            InternalError::Authorization(inner) => {
                tracing::warn!("Rejected {:?}: {}", inner.role(), inner);
                Self::forbidden(inner.to_string())
            }
            InternalError::NotFound(inner) => Self::not_found(inner.to_string()),
            InternalError::Validation(inner) => Self::bad_request(inner.to_string()),
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ServiceError::BadRequest(json)
            | ServiceError::Forbidden(json)
            | ServiceError::NotFound(json)
            | ServiceError::InternalError(json) => json.0.message.clone(),
            ServiceError::Unauthorized(json, _) => json.0.message.clone(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(json)
            | ServiceError::Forbidden(json)
            | ServiceError::NotFound(json)
            | ServiceError::InternalError(json) => json.0.status_code,
            ServiceError::Unauthorized(json, _) => json.0.status_code,
        }
    }
}

impl From<InternalError> for ServiceError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::from_internal_error(err.into())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
