use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, EnvironmentProvider, SecretManager};
use crate::errors::InternalError;
use crate::providers::{AuthenticationProvider, AuthorizationProvider, TokenProvider};
use crate::stores::{CommentStore, RequestStore, UserStore};

/// Centralized application data
///
/// Everything is created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ user_store / request_store / comment_store
///   └─ token_provider, authentication_provider, authorization_provider
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   └─ XxxCoordinator::new(app_data) → picks what it needs
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub feedback_url: String,
    pub user_store: Arc<UserStore>,
    pub request_store: Arc<RequestStore>,
    pub comment_store: Arc<CommentStore>,
    pub token_provider: Arc<TokenProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
    pub authorization_provider: AuthorizationProvider,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    /// Returns `InternalError` when the signing secret cannot be loaded
    pub fn init(
        db: DatabaseConnection,
        settings: &BootstrapSettings,
        env: &dyn EnvironmentProvider,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let secret_manager = SecretManager::init(env)
            .map_err(|e| InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e)))?;
        tracing::debug!("Secret manager initialized: {}", secret_manager);

        let app_data = Self::new(db, Arc::new(secret_manager), settings.feedback_url().to_string());

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Wire stores and providers around an existing connection and secret
    pub fn new(db: DatabaseConnection, secret_manager: Arc<SecretManager>, feedback_url: String) -> Self {
        let user_store = Arc::new(UserStore::new(db.clone()));
        let request_store = Arc::new(RequestStore::new(db.clone()));
        let comment_store = Arc::new(CommentStore::new(db.clone()));

        let token_provider = Arc::new(TokenProvider::new(secret_manager.clone()));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            user_store.clone(),
            token_provider.clone(),
        ));

        Self {
            db,
            secret_manager,
            feedback_url,
            user_store,
            request_store,
            comment_store,
            token_provider,
            authentication_provider,
            authorization_provider: AuthorizationProvider,
        }
    }
}
