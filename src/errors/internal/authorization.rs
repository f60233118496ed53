use thiserror::Error;

use crate::types::internal::auth::{Operation, Role};

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Access denied for role: {role}")]
    RoleNotPermitted { role: Role, operation: Operation },

    /// A customer reached for a request owned by someone else
    #[error("Access denied for role: {role}: request {request_id} belongs to another client")]
    NotOwner { role: Role, request_id: i32 },
}

impl AuthorizationError {
    pub fn role(&self) -> Role {
        match self {
            Self::RoleNotPermitted { role, .. } | Self::NotOwner { role, .. } => *role,
        }
    }
}
