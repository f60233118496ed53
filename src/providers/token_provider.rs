use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::SecretManager;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::auth::{Claims, Role};

/// Access tokens live for a day
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Issues and validates HS256 access tokens
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    token_ttl: Duration,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self::with_ttl(secret_manager, Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret_manager: Arc<SecretManager>, token_ttl: Duration) -> Self {
        Self {
            secret_manager,
            token_ttl,
        }
    }

    /// Encode a signed token for `user_id` holding `role`
    pub fn issue(&self, user_id: i32, role: Role) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: now + self.token_ttl.num_seconds(),
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Verify signature and expiry and return the claims
    ///
    /// # Errors
    /// * `CredentialError::ExpiredToken` - `exp` is in the past
    /// * `CredentialError::InvalidToken` - bad signature, malformed, or `sub`/`exp` absent
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken.into(),
            _ => CredentialError::invalid_token(e.to_string()).into(),
        })
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl.num_seconds())
            .finish()
    }
}
