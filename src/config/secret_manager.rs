use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SecretConfig, SecretType};

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const JWT_SECRET_FILE_VAR: &str = "JWT_SECRET_FILE";
pub const JWT_SECRET_MIN_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read secret file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Holds the token signing secret
pub struct SecretManager {
    jwt_secret: String,
}

impl SecretManager {
    /// Load and validate the signing secret
    ///
    /// `JWT_SECRET_FILE` takes precedence over `JWT_SECRET` when both are set.
    ///
    /// # Errors
    /// Returns `SecretError` if the secret is missing, unreadable or too short
    pub fn init(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env, &Self::jwt_config(env))?;
        Ok(Self { jwt_secret })
    }

    /// Build a manager around a known secret (CLI tooling and tests)
    pub fn from_secret(jwt_secret: impl Into<String>) -> Result<Self, SecretError> {
        let jwt_secret = jwt_secret.into();
        Self::check_length(JWT_SECRET_VAR, &jwt_secret, Some(JWT_SECRET_MIN_LENGTH))?;
        Ok(Self { jwt_secret })
    }

    fn jwt_config(env: &dyn EnvironmentProvider) -> SecretConfig {
        let secret_type = match env.get_var(JWT_SECRET_FILE_VAR) {
            Some(path) => SecretType::File {
                path: PathBuf::from(path),
            },
            None => SecretType::EnvVar {
                name: JWT_SECRET_VAR.to_string(),
            },
        };
        SecretConfig::new(secret_type).min_length(JWT_SECRET_MIN_LENGTH)
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub(crate) fn load_secret(
        env: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => env
                .get_var(name)
                .ok_or_else(|| SecretError::Missing {
                    secret_name: name.clone(),
                })?,
            SecretType::File { path } => std::fs::read_to_string(path)
                .map_err(|source| SecretError::Unreadable {
                    path: path.display().to_string(),
                    source,
                })?
                .trim_end()
                .to_string(),
        };

        Self::check_length(&config.secret_type.describe(), &value, config.min_length)?;
        Ok(value)
    }

    fn check_length(name: &str, value: &str, min_length: Option<usize>) -> Result<(), SecretError> {
        match min_length {
            Some(min) if value.len() < min => Err(SecretError::InvalidLength {
                secret_name: name.to_string(),
                expected: min,
                actual: value.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 1 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;
    use std::io::Write;

    const VALID: &str = "this-is-a-valid-jwt-secret-with-32-characters";

    #[test]
    fn test_loads_secret_from_env() {
        let env = MockEnvironment::empty().with_var(JWT_SECRET_VAR, VALID);

        let manager = SecretManager::init(&env).unwrap();

        assert_eq!(manager.jwt_secret(), VALID);
    }

    #[test]
    fn test_missing_secret() {
        let result = SecretManager::init(&MockEnvironment::empty());

        assert!(matches!(
            result,
            Err(SecretError::Missing { secret_name }) if secret_name == JWT_SECRET_VAR
        ));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let env = MockEnvironment::empty().with_var(JWT_SECRET_VAR, "short");

        match SecretManager::init(&env) {
            Err(SecretError::InvalidLength { expected, actual, .. }) => {
                assert_eq!(expected, 32);
                assert_eq!(actual, 5);
            }
            other => panic!("Expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn test_file_secret_wins_and_is_trimmed() {
        let path = std::env::temp_dir().join(format!("jwt-secret-{}", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", VALID).unwrap();

        let env = MockEnvironment::empty()
            .with_var(JWT_SECRET_VAR, "ignored-because-the-file-is-configured")
            .with_var(JWT_SECRET_FILE_VAR, path.to_str().unwrap());

        let manager = SecretManager::init(&env).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(manager.jwt_secret(), VALID);
    }

    #[test]
    fn test_unreadable_file() {
        let env = MockEnvironment::empty().with_var(JWT_SECRET_FILE_VAR, "/nonexistent/jwt-secret");

        assert!(matches!(
            SecretManager::init(&env),
            Err(SecretError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let manager = SecretManager::from_secret(VALID).unwrap();

        let debug = format!("{:?}", manager);
        assert!(!debug.contains(VALID));
        assert!(debug.contains("<redacted>"));
    }
}
