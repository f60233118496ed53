use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::comment;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub message: String,
    pub master_id: i32,
    pub request_id: i32,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub master_id: i32,
    pub request_id: i32,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            message: c.message,
            created_at: c.created_at,
            master_id: c.master_id,
            request_id: c.request_id,
        }
    }
}
