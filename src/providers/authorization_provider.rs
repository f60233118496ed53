use crate::errors::internal::AuthorizationError;
use crate::errors::InternalError;
use crate::types::db::repair_request;
use crate::types::internal::auth::{Caller, Operation, Role};

const MANAGERS: &[Role] = &[Role::Manager, Role::QualityManager];
const MANAGER_ONLY: &[Role] = &[Role::Manager];
const COMMENT_AUTHORS: &[Role] = &[Role::Specialist, Role::Manager, Role::QualityManager];
const CUSTOMER_ONLY: &[Role] = &[Role::Customer];

/// Static role policy for every API operation
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationProvider;

impl AuthorizationProvider {
    /// Roles permitted to perform `operation`
    pub fn allowed_roles(operation: Operation) -> &'static [Role] {
        use Operation::*;

        match operation {
            ListUsers | UpdateUser => MANAGERS,
            ReadUser => Role::STAFF,
            CreateUser | DeleteUser => MANAGER_ONLY,
            ListRequests | SearchRequests | CreateRequest | UpdateRequest => Role::STAFF,
            ReadRequest => Role::ALL,
            DeleteRequest => MANAGER_ONLY,
            AssignMaster | ExtendDeadline => MANAGERS,
            ViewStatistics => Role::ALL,
            ListComments | ReadComment => Role::ALL,
            CreateComment => COMMENT_AUTHORS,
            DeleteComment => MANAGERS,
            ClientRequests => CUSTOMER_ONLY,
            FeedbackQr => Role::ALL,
        }
    }

    /// Reject the caller unless its role is on the allow-list
    pub fn authorize(&self, caller: &Caller, operation: Operation) -> Result<(), InternalError> {
        if Self::allowed_roles(operation).contains(&caller.role) {
            return Ok(());
        }

        tracing::debug!(
            user_id = caller.user_id,
            role = %caller.role,
            "Operation {:?} denied",
            operation
        );
        Err(AuthorizationError::RoleNotPermitted {
            role: caller.role,
            operation,
        }
        .into())
    }

    /// Customers may only touch requests where they are the client
    pub fn authorize_request_access(
        &self,
        caller: &Caller,
        request: &repair_request::Model,
    ) -> Result<(), InternalError> {
        match caller.tenant() {
            Some(client_id) if request.client_id != Some(client_id) => {
                Err(AuthorizationError::NotOwner {
                    role: caller.role,
                    request_id: request.id,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
