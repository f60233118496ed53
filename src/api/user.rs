use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::app_data::AppData;
use crate::coordinators::UserCoordinator;
use crate::errors::ServiceError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::common::DetailResponse;
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;

pub struct UserApi {
    user_coordinator: UserCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            user_coordinator: UserCoordinator::new(app_data),
        }
    }

    async fn context(&self, req: &Request) -> Result<RequestContext, ServiceError> {
        Ok(RequestContext::authenticate(req, &self.authentication_provider).await?)
    }
}

#[derive(Tags)]
enum UserTags {
    /// User management
    Users,
}

#[OpenApi]
impl UserApi {
    /// List users
    #[oai(path = "/users/", method = "get", tag = "UserTags::Users")]
    async fn list_users(
        &self,
        req: &Request,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<UserResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let users = self
            .user_coordinator
            .list_users(&ctx, Page::new(skip.0, limit.0)?)
            .await?;
        Ok(Json(users.into_iter().map(UserResponse::from).collect()))
    }

    #[oai(path = "/users/:user_id", method = "get", tag = "UserTags::Users")]
    async fn get_user(&self, req: &Request, user_id: Path<i32>) -> Result<Json<UserResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let user = self.user_coordinator.get_user(&ctx, user_id.0).await?;
        Ok(Json(user.into()))
    }

    #[oai(path = "/users/", method = "post", tag = "UserTags::Users")]
    async fn create_user(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let new_user = body.0.into_new_user()?;
        let user = self.user_coordinator.create_user(&ctx, new_user).await?;
        Ok(Json(user.into()))
    }

    /// Update the supplied fields of a user; an empty password is ignored
    #[oai(path = "/users/:user_id", method = "put", tag = "UserTags::Users")]
    async fn update_user(
        &self,
        req: &Request,
        user_id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let changes = body.0.into_changes()?;
        let user = self
            .user_coordinator
            .update_user(&ctx, user_id.0, changes)
            .await?;
        Ok(Json(user.into()))
    }

    #[oai(path = "/users/:user_id", method = "delete", tag = "UserTags::Users")]
    async fn delete_user(&self, req: &Request, user_id: Path<i32>) -> Result<Json<DetailResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        self.user_coordinator.delete_user(&ctx, user_id.0).await?;
        Ok(Json(DetailResponse::new("User deleted")))
    }
}
