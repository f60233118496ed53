use std::sync::Arc;

use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::errors::ServiceError;
use crate::providers::AuthenticationProvider;
use crate::types::internal::context::RequestContext;

/// Paths served without a bearer token
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/auth/login", "/openapi.json"];
const PUBLIC_PREFIXES: &[&str] = &["/swagger"];

/// Authenticate every protected request before its handler runs
///
/// The resolved caller is stored in the request extensions, where
/// `RequestContext::authenticate` picks it up. Rejections carry the
/// `WWW-Authenticate: Bearer` challenge and the standard error body, even
/// when the request body would not have parsed.
pub struct Authenticate {
    authentication_provider: Arc<AuthenticationProvider>,
}

impl Authenticate {
    pub fn new(authentication_provider: Arc<AuthenticationProvider>) -> Self {
        Self {
            authentication_provider,
        }
    }
}

impl<E: Endpoint> Middleware<E> for Authenticate {
    type Output = AuthenticateEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        AuthenticateEndpoint {
            inner: ep,
            authentication_provider: self.authentication_provider.clone(),
        }
    }
}

pub struct AuthenticateEndpoint<E> {
    inner: E,
    authentication_provider: Arc<AuthenticationProvider>,
}

fn is_public(path: &str) -> bool {
    let path = if path.is_empty() { "/" } else { path };
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

impl<E: Endpoint> Endpoint for AuthenticateEndpoint<E> {
    type Output = Response;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        if !is_public(req.uri().path()) {
            match RequestContext::authenticate(&req, &self.authentication_provider).await {
                Ok(ctx) => {
                    if let Some(caller) = ctx.caller {
                        req.extensions_mut().insert(caller);
                    }
                }
                Err(e) => return Ok(ServiceError::from_internal_error(e).into_response()),
            }
        }

        self.inner.call(req).await.map(IntoResponse::into_response)
    }
}
