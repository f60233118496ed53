// Create a user from the command line.
// HTTP user creation requires a manager, so the first one is made here.

use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::{connect_database, migrate_database, BootstrapSettings, EnvironmentProvider};
use crate::coordinators::UserCoordinator;
use crate::types::internal::auth::Role;
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::NewUser;

/// Arguments collected by the `create-user` subcommand
#[derive(Debug, Clone)]
pub struct UserArgs {
    pub login: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
}

impl From<UserArgs> for NewUser {
    fn from(args: UserArgs) -> Self {
        NewUser {
            full_name: args.full_name,
            phone: args.phone,
            login: args.login,
            password: args.password,
            role: args.role,
        }
    }
}

pub async fn create_user(
    settings: &BootstrapSettings,
    env: &dyn EnvironmentProvider,
    args: UserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings, env)?);
    create_user_with(app_data, args).await
}

/// Insert the user through the coordinator with a CLI context
pub async fn create_user_with(
    app_data: Arc<AppData>,
    args: UserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("create_user");
    let coordinator = UserCoordinator::new(app_data);

    match coordinator.create_user(&ctx, args.into()).await {
        Ok(user) => {
            println!("✅ Created user {} ({}) with role {}", user.login, user.id, user.role);
            Ok(())
        }
        Err(e) => {
            println!("❌ Error: {}", e);
            Err(e.into())
        }
    }
}
