use super::session::PortalSession;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Warning,
    Danger,
}

/// One-shot message shown on the page the user is redirected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Where to send the browser instead of rendering the route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub flash: Flash,
}

impl Redirect {
    fn new(location: &str, level: FlashLevel, message: &str) -> Self {
        Self {
            location: location.to_string(),
            flash: Flash {
                level,
                message: message.to_string(),
            },
        }
    }
}

/// Access check run before a portal route renders
pub trait RouteGuard: Send + Sync {
    /// `None` lets the request through
    fn check(&self, session: &PortalSession) -> Option<Redirect>;
}

/// Requires a signed-in session
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireSession;

impl RouteGuard for RequireSession {
    fn check(&self, session: &PortalSession) -> Option<Redirect> {
        if session.is_signed_in() {
            None
        } else {
            Some(Redirect::new(LOGIN_PATH, FlashLevel::Warning, "Please log in to access this page"))
        }
    }
}

/// Requires the session role to be one of `roles`
#[derive(Debug, Clone)]
pub struct RequireRole(pub Vec<&'static str>);

impl RouteGuard for RequireRole {
    fn check(&self, session: &PortalSession) -> Option<Redirect> {
        if session.has_role(&self.0) {
            None
        } else {
            Some(Redirect::new(HOME_PATH, FlashLevel::Danger, "You do not have permission to access this page"))
        }
    }
}

/// Guards for one route, evaluated in order; the first redirect wins
#[derive(Default)]
pub struct GuardChain {
    guards: Vec<Box<dyn RouteGuard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, guard: impl RouteGuard + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Session plus role check, the usual combination for staff pages
    pub fn for_roles(roles: &[&'static str]) -> Self {
        Self::new()
            .with(RequireSession)
            .with(RequireRole(roles.to_vec()))
    }

    pub fn check(&self, session: &PortalSession) -> Option<Redirect> {
        self.guards.iter().find_map(|guard| guard.check(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: &str) -> PortalSession {
        PortalSession {
            token: Some("t".to_string()),
            role: Some(role.to_string()),
            user_id: Some(1),
        }
    }

    #[test]
    fn test_missing_session_redirects_to_login() {
        let chain = GuardChain::for_roles(&["manager"]);

        let redirect = chain.check(&PortalSession::default()).unwrap();
        assert_eq!(redirect.location, LOGIN_PATH);
        assert_eq!(redirect.flash.level, FlashLevel::Warning);
    }

    #[test]
    fn test_wrong_role_redirects_home() {
        let chain = GuardChain::for_roles(&["manager", "quality-manager"]);

        let redirect = chain.check(&session("customer")).unwrap();
        assert_eq!(redirect.location, HOME_PATH);
        assert_eq!(redirect.flash.level, FlashLevel::Danger);
    }

    #[test]
    fn test_allowed_role_passes() {
        let chain = GuardChain::for_roles(&["manager", "quality-manager"]);
        assert_eq!(chain.check(&session("quality-manager")), None);
    }

    #[test]
    fn test_empty_chain_allows_everyone() {
        assert_eq!(GuardChain::new().check(&PortalSession::default()), None);
    }
}
