use std::sync::Arc;

use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::AuthError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::auth::{LoginRequest, TokenResponse};
use crate::types::dto::user::UserResponse;
use crate::types::internal::context::RequestContext;

/// Authentication API endpoints
pub struct AuthApi {
    auth_coordinator: AuthCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            auth_coordinator: AuthCoordinator::new(app_data),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Login with login and password to receive an access token
    #[oai(path = "/auth/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<TokenResponse>, AuthError> {
        let ctx = RequestContext::anonymous(req);

        let (access_token, user) = self
            .auth_coordinator
            .login(&ctx, &body.login, &body.password)
            .await?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            role: user.role,
            user_id: user.id,
        }))
    }

    /// Profile of the user the bearer token belongs to
    #[oai(path = "/auth/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, req: &Request) -> Result<Json<UserResponse>, AuthError> {
        let ctx = RequestContext::authenticate(req, &self.authentication_provider).await?;

        let user = self.auth_coordinator.current_user(&ctx).await?;
        Ok(Json(user.into()))
    }
}
