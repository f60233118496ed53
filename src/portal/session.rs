use crate::types::dto::auth::TokenResponse;

/// Browser session state kept by the portal after login
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalSession {
    pub token: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<i32>,
}

impl PortalSession {
    /// Store the token, role and user id from a successful login
    pub fn sign_in(&mut self, login: &TokenResponse) {
        self.token = Some(login.access_token.clone());
        self.role = Some(login.role.clone());
        self.user_id = Some(login.user_id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_role(&self, roles: &[&str]) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_response() -> TokenResponse {
        TokenResponse {
            access_token: "token-123".to_string(),
            token_type: "bearer".to_string(),
            role: "manager".to_string(),
            user_id: 4,
        }
    }

    #[test]
    fn test_sign_in_then_clear() {
        let mut session = PortalSession::default();
        assert!(!session.is_signed_in());

        session.sign_in(&login_response());
        assert!(session.is_signed_in());
        assert_eq!(session.user_id, Some(4));
        assert!(session.has_role(&["manager", "quality-manager"]));
        assert!(!session.has_role(&["customer"]));

        session.clear();
        assert_eq!(session, PortalSession::default());
    }
}
