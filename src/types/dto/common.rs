use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Response model for the root endpoint
#[derive(Object, Debug)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Confirmation returned by delete endpoints
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Link to the customer feedback form
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback_url: String,
}
