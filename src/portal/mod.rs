// Portal layer - support for a server-rendered front end that talks to the API
//
// Holds the signed-in session, per-route access guards and a typed HTTP client.
pub mod client;
pub mod guards;
pub mod session;

pub use client::{ApiClient, PortalError};
pub use guards::{Flash, FlashLevel, GuardChain, Redirect, RequireRole, RequireSession, RouteGuard};
pub use session::PortalSession;
