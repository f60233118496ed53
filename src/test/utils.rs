// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::SecretManager;
use crate::providers::TokenProvider;
use crate::types::internal::auth::{Caller, Role};
use crate::types::internal::context::RequestContext;
use crate::types::internal::repair::{NewRepairRequest, DEFAULT_PRIORITY, INITIAL_STATUS};
use crate::types::internal::user::NewUser;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_FEEDBACK_URL: &str = "https://example.org/feedback";

/// In-memory SQLite database with the schema applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(SecretManager::from_secret(TEST_JWT_SECRET).expect("test secret is long enough"))
}

pub fn test_token_provider() -> TokenProvider {
    TokenProvider::new(test_secret_manager())
}

/// Fully wired application state over a fresh database
pub async fn setup_test_app_data() -> Arc<AppData> {
    Arc::new(AppData::new(
        setup_test_db().await,
        test_secret_manager(),
        TEST_FEEDBACK_URL.to_string(),
    ))
}

/// A user whose password is "password"
pub fn new_user(login: &str, role: Role) -> NewUser {
    NewUser {
        full_name: format!("{} Test", login),
        phone: "+7 900 123-45-67".to_string(),
        login: login.to_string(),
        password: "password".to_string(),
        role,
    }
}

/// A fresh unassigned request for the given equipment type
pub fn new_request(equipment_type: &str) -> NewRepairRequest {
    NewRepairRequest {
        start_date: date(2024, 1, 1),
        equipment_type: equipment_type.to_string(),
        equipment_model: "Model X".to_string(),
        problem_description: "Does not turn on".to_string(),
        status: INITIAL_STATUS.to_string(),
        completion_date: None,
        repair_parts: None,
        deadline: None,
        priority: DEFAULT_PRIORITY.to_string(),
        master_id: None,
        client_id: None,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn caller(user_id: i32, role: Role) -> Caller {
    Caller {
        user_id,
        login: format!("user{}", user_id),
        role,
    }
}

/// API context already authenticated as `caller`
pub fn context_for(caller: Caller) -> RequestContext {
    RequestContext::for_cli("test").with_caller(caller)
}
