#[cfg(test)]
mod tests {
    use crate::errors::internal::{CredentialError, InternalError, NotFoundError};
    use crate::errors::AuthError;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let db_err = DbErr::RecordNotFound("test".to_string());
        let internal_err = InternalError::database("find_user_by_login", db_err);
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::InternalError(_)));
        assert_eq!(auth_err.message(), "An internal error occurred");
    }

    #[test]
    fn test_invalid_credentials_converts_correctly() {
        let internal_err = InternalError::Credential(CredentialError::InvalidCredentials);
        let auth_err = AuthError::from_internal_error(internal_err);

        assert!(matches!(auth_err, AuthError::InvalidCredentials(_)));
        assert_eq!(auth_err.message(), "Invalid login or password");
    }

    #[test]
    fn test_invalid_token_carries_bearer_challenge() {
        let internal_err = InternalError::Credential(CredentialError::invalid_token("bad signature"));
        let auth_err = AuthError::from_internal_error(internal_err);

        match auth_err {
            AuthError::Unauthorized(body, challenge) => {
                assert_eq!(body.0.status_code, 401);
                assert_eq!(challenge, "Bearer");
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_token_message() {
        let auth_err = AuthError::from_internal_error(CredentialError::ExpiredToken.into());

        assert_eq!(auth_err.message(), "Token has expired");
    }

    #[test]
    fn test_not_found_is_hidden_behind_internal_error() {
        let auth_err = AuthError::from_internal_error(NotFoundError::User(3).into());

        assert!(matches!(auth_err, AuthError::InternalError(_)));
    }
}
