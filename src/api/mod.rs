// API layer - HTTP endpoints
pub mod auth;
pub mod client;
pub mod comment;
pub mod health;
pub mod middleware;
pub mod request;
pub mod user;

use std::sync::Arc;

use poem::endpoint::BoxEndpoint;
use poem::middleware::{NormalizePath, TrailingSlash};
use poem::{EndpointExt, Route};
use poem_openapi::OpenApiService;

pub use auth::AuthApi;
pub use client::ClientApi;
pub use comment::CommentApi;
pub use health::HealthApi;
pub use middleware::Authenticate;
pub use request::RequestApi;
pub use user::UserApi;

use crate::app_data::AppData;

pub type ServiceCenterApi = (HealthApi, AuthApi, UserApi, RequestApi, CommentApi, ClientApi);

/// OpenAPI service with every endpoint group
pub fn build_api_service(app_data: Arc<AppData>, server_url: &str) -> OpenApiService<ServiceCenterApi, ()> {
    OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            UserApi::new(app_data.clone()),
            RequestApi::new(app_data.clone()),
            CommentApi::new(app_data.clone()),
            ClientApi::new(app_data),
        ),
        "Service Center API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url)
}

/// Compose routes: Swagger UI under /swagger, the API at the root
///
/// Trailing slashes are trimmed before routing, so `/requests/` and
/// `/requests` reach the same operation. Protected paths are authenticated
/// before any body is read.
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> BoxEndpoint<'static> {
    let authenticate = Authenticate::new(app_data.authentication_provider.clone());
    let api_service = build_api_service(app_data, server_url);
    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/swagger", ui)
        .at("/openapi.json", spec)
        .nest("/", api_service)
        .with(authenticate)
        .with(NormalizePath::new(TrailingSlash::Trim))
        .boxed()
}
