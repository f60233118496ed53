use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::auth::Operation;
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;
use crate::types::internal::user::{NewUser, UserChanges};

/// Handles user lifecycle operations
pub struct UserCoordinator {
    authorization_provider: AuthorizationProvider,
    user_store: Arc<UserStore>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authorization_provider: app_data.authorization_provider,
            user_store: app_data.user_store.clone(),
        }
    }

    fn authorize(&self, ctx: &RequestContext, operation: Operation) -> Result<(), InternalError> {
        self.authorization_provider.authorize(ctx.caller()?, operation)
    }

    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: Page,
    ) -> Result<Vec<user::Model>, InternalError> {
        self.authorize(ctx, Operation::ListUsers)?;
        self.user_store.list(page).await
    }

    pub async fn get_user(&self, ctx: &RequestContext, id: i32) -> Result<user::Model, InternalError> {
        self.authorize(ctx, Operation::ReadUser)?;
        self.user_store.get(id).await
    }

    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        new_user: NewUser,
    ) -> Result<user::Model, InternalError> {
        // CLI contexts have no caller and bootstrap the first manager
        if ctx.caller.is_some() {
            self.authorize(ctx, Operation::CreateUser)?;
        }

        let user = self.user_store.create(new_user).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            user_id = user.id,
            role = %user.role,
            "User created"
        );
        Ok(user)
    }

    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: i32,
        changes: UserChanges,
    ) -> Result<user::Model, InternalError> {
        self.authorize(ctx, Operation::UpdateUser)?;

        let user = self.user_store.update(id, changes).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id, user_id = id, "User updated");
        Ok(user)
    }

    /// Delete a user; authored comments go with it, request references are cleared
    pub async fn delete_user(&self, ctx: &RequestContext, id: i32) -> Result<(), InternalError> {
        self.authorize(ctx, Operation::DeleteUser)?;

        self.user_store.delete(id).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id, user_id = id, "User deleted");
        Ok(())
    }
}
