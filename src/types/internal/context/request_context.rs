use std::net::IpAddr;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::AuthenticationProvider;
use crate::types::internal::auth::Caller;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries who is calling and where the call came from, for authorization
/// decisions in coordinators and for log lines in every layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,

    /// Authenticated caller, if any
    pub caller: Option<Caller>,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
            caller: None,
        }
    }

    /// Create an unauthenticated API context (used by /auth/login)
    pub fn anonymous(req: &Request) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
            caller: None,
        }
    }

    /// Create an authenticated API context
    ///
    /// Every protected endpoint calls this first. The bearer token is validated
    /// and its subject re-read from the database, so a deleted user or a changed
    /// role takes effect on the next call.
    ///
    /// # Errors
    /// * `CredentialError::MissingToken` - no `Authorization: Bearer` header
    /// * any error from `AuthenticationProvider::authenticate_bearer`
    pub async fn authenticate(
        req: &Request,
        authentication_provider: &AuthenticationProvider,
    ) -> Result<Self, InternalError> {
        let ctx = Self::anonymous(req);

        // Already resolved by the authentication middleware
        if let Some(caller) = req.extensions().get::<Caller>() {
            return Ok(ctx.with_caller(caller.clone()));
        }

        let bearer = Self::extract_bearer(req).ok_or(CredentialError::MissingToken)?;
        let caller = authentication_provider
            .authenticate_bearer(&bearer.token)
            .await
            .inspect_err(|e| {
                tracing::debug!(request_id = %ctx.request_id, "Bearer rejected: {}", e);
            })?;

        let ctx = ctx.with_caller(caller);
        tracing::trace!("Request context created: {:?}", ctx);

        Ok(ctx)
    }

    /// Set the authenticated caller and use it as the actor
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.actor_id = format!("user:{}", caller.user_id);
        self.caller = Some(caller);
        self
    }

    /// The authenticated caller, or MissingToken for anonymous contexts
    pub fn caller(&self) -> Result<&Caller, InternalError> {
        self.caller
            .as_ref()
            .ok_or_else(|| CredentialError::MissingToken.into())
    }

    fn extract_bearer(req: &Request) -> Option<Bearer> {
        Bearer::from_request(req).ok()
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
