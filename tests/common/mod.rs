// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::endpoint::BoxEndpoint;
use poem::test::TestClient;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};

use service_center_backend::api::build_routes;
use service_center_backend::config::{EnvironmentProvider, SecretManager};
use service_center_backend::coordinators::UserCoordinator;
use service_center_backend::types::internal::auth::Role;
use service_center_backend::types::internal::context::RequestContext;
use service_center_backend::types::internal::user::NewUser;
use service_center_backend::AppData;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const FEEDBACK_URL: &str = "https://example.org/feedback-form";

/// Fixed set of variables standing in for the process environment
#[derive(Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Full router over a fresh database
pub struct TestApp {
    pub client: TestClient<BoxEndpoint<'static>>,
    pub app_data: Arc<AppData>,
}

impl TestApp {
    pub async fn new() -> Self {
        let secret_manager = SecretManager::from_secret(JWT_SECRET).expect("valid test secret");
        let app_data = Arc::new(AppData::new(
            setup_test_db().await,
            Arc::new(secret_manager),
            FEEDBACK_URL.to_string(),
        ));
        let client = TestClient::new(build_routes(app_data.clone(), "http://localhost:8000"));

        Self { client, app_data }
    }

    /// Insert a user directly; the password equals the login
    pub async fn seed_user(&self, login: &str, role: Role) -> i32 {
        let coordinator = UserCoordinator::new(self.app_data.clone());
        let user = coordinator
            .create_user(
                &RequestContext::for_cli("seed"),
                NewUser {
                    full_name: format!("{} Tester", login),
                    phone: "89001234567".to_string(),
                    login: login.to_string(),
                    password: login.to_string(),
                    role,
                },
            )
            .await
            .expect("Failed to seed user");
        user.id
    }

    /// Log in as a seeded user and return the bearer header value
    pub async fn bearer(&self, login: &str) -> String {
        let resp = self
            .client
            .post("/auth/login")
            .body_json(&json!({ "login": login, "password": login }))
            .send()
            .await;
        resp.assert_status_is_ok();

        let body: Value = resp.json().await.value().deserialize();
        format!("Bearer {}", body["access_token"].as_str().expect("token in login response"))
    }

    /// Seed a user and log in as them
    pub async fn sign_in(&self, login: &str, role: Role) -> (i32, String) {
        let id = self.seed_user(login, role).await;
        (id, self.bearer(login).await)
    }
}

/// Minimal valid body for POST /requests/
pub fn request_body(equipment_type: &str) -> Value {
    json!({
        "start_date": "2024-03-01",
        "equipment_type": equipment_type,
        "equipment_model": "Model 7",
        "problem_description": "Makes a grinding noise",
    })
}
