use std::sync::Arc;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::TokenProvider;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::auth::{Caller, Role};

/// Verifies logins and turns bearer tokens into callers
pub struct AuthenticationProvider {
    user_store: Arc<UserStore>,
    token_provider: Arc<TokenProvider>,
}

impl AuthenticationProvider {
    pub fn new(user_store: Arc<UserStore>, token_provider: Arc<TokenProvider>) -> Self {
        Self {
            user_store,
            token_provider,
        }
    }

    /// Check a login/password pair
    ///
    /// INSECURE: passwords are stored verbatim and compared byte for byte.
    /// Unknown login and wrong password produce the same error.
    pub async fn verify_credentials(
        &self,
        login: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = self
            .user_store
            .find_by_login(login)
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        if user.password.as_bytes() != password.as_bytes() {
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Resolve a bearer token to the user it names
    ///
    /// The role is taken from the stored user, not from the token, so a role
    /// change applies to tokens issued before it.
    pub async fn authenticate_bearer(&self, token: &str) -> Result<Caller, InternalError> {
        let claims = self.token_provider.validate(token)?;

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| CredentialError::invalid_token("subject is not a user id"))?;

        let user = match self.user_store.get(user_id).await {
            Ok(user) => user,
            Err(InternalError::NotFound(_)) => {
                return Err(CredentialError::UnknownSubject { subject: claims.sub }.into())
            }
            Err(e) => return Err(e),
        };

        let role = user
            .role
            .parse::<Role>()
            .map_err(|e| InternalError::parse("stored role", e.to_string()))?;

        Ok(Caller {
            user_id: user.id,
            login: user.login,
            role,
        })
    }
}
