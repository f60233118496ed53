use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::db::user;
use crate::types::internal::auth::Role;
use crate::types::internal::user::{NewUser, UserChanges};

/// Request model for creating a user
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub phone: String,
    pub login: String,
    pub password: String,

    /// One of operator, specialist, manager, quality-manager, customer
    pub role: String,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> Result<NewUser, ValidationError> {
        Ok(NewUser {
            role: self.role.parse()?,
            full_name: self.full_name,
            phone: self.phone,
            login: self.login,
            password: self.password,
        })
    }
}

/// Request model for updating a user; omitted fields are left unchanged
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,

    /// An empty string keeps the current password
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_changes(self) -> Result<UserChanges, ValidationError> {
        let role = self.role.map(|r| r.parse::<Role>()).transpose()?;
        Ok(UserChanges {
            full_name: self.full_name,
            phone: self.phone,
            password: self.password,
            role,
        })
    }
}

/// A user as returned by the API. The password never leaves the server.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub full_name: String,
    pub phone: String,
    pub login: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            phone: u.phone,
            login: u.login,
            role: u.role,
            created_at: u.created_at,
            is_active: u.is_active,
        }
    }
}
