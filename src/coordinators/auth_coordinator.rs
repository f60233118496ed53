use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{AuthenticationProvider, TokenProvider};
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::auth::Role;
use crate::types::internal::context::RequestContext;

/// Authentication coordinator for login and profile lookups
pub struct AuthCoordinator {
    authentication_provider: Arc<AuthenticationProvider>,
    token_provider: Arc<TokenProvider>,
    user_store: Arc<UserStore>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            token_provider: app_data.token_provider.clone(),
            user_store: app_data.user_store.clone(),
        }
    }

    /// Verify credentials and issue an access token
    ///
    /// # Returns
    /// * `Ok((access_token, user))`
    /// * `Err(CredentialError::InvalidCredentials)` for an unknown login or wrong password
    pub async fn login(
        &self,
        ctx: &RequestContext,
        login: &str,
        password: &str,
    ) -> Result<(String, user::Model), InternalError> {
        match self.issue_for(login, password).await {
            Ok((token, user)) => {
                tracing::info!(
                    request_id = %ctx.request_id,
                    ip = ?ctx.ip_address,
                    user_id = user.id,
                    "Login succeeded"
                );
                Ok((token, user))
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    ip = ?ctx.ip_address,
                    login = login,
                    "Login failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn issue_for(&self, login: &str, password: &str) -> Result<(String, user::Model), InternalError> {
        let user = self
            .authentication_provider
            .verify_credentials(login, password)
            .await?;
        let role: Role = user.role.parse()?;
        let token = self.token_provider.issue(user.id, role)?;
        Ok((token, user))
    }

    /// Profile of the authenticated caller
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<user::Model, InternalError> {
        let caller = ctx.caller()?;
        self.user_store.get(caller.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::CredentialError;
    use crate::test::utils::{new_user, setup_test_app_data};

    #[tokio::test]
    async fn test_login_token_names_the_user() {
        let app_data = setup_test_app_data().await;
        let user = app_data
            .user_store
            .create(new_user("boss", Role::Manager))
            .await
            .unwrap();
        let coordinator = AuthCoordinator::new(app_data.clone());

        let (token, logged_in) = coordinator
            .login(&RequestContext::for_cli("test"), "boss", "password")
            .await
            .unwrap();

        assert_eq!(logged_in.id, user.id);
        let claims = app_data.token_provider.validate(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, "manager");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let app_data = setup_test_app_data().await;
        app_data
            .user_store
            .create(new_user("boss", Role::Manager))
            .await
            .unwrap();
        let coordinator = AuthCoordinator::new(app_data);

        assert!(matches!(
            coordinator
                .login(&RequestContext::for_cli("test"), "boss", "nope")
                .await,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
    }
}
