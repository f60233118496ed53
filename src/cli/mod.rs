// CLI module for administrative operations requiring server access

pub mod create_user;
pub mod migrate;

use clap::{Parser, Subcommand};

use crate::config::{BootstrapSettings, EnvironmentProvider};
use crate::types::internal::auth::Role;

/// Service center CLI
#[derive(Parser, Debug)]
#[command(name = "service-center")]
#[command(about = "Service center ticketing backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Apply migrations and run the HTTP server (default)
    Serve,

    /// Apply pending migrations and exit
    Migrate,

    /// Insert a user directly, e.g. the first manager
    CreateUser {
        #[arg(long)]
        login: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        full_name: String,

        #[arg(long)]
        phone: String,

        #[arg(long, value_parser = parse_role)]
        role: Role,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|e: crate::errors::internal::ValidationError| e.to_string())
}

/// Execute a non-server CLI command
///
/// Returns `Ok(false)` when the command is `serve` (or absent) and the caller
/// should start the HTTP server instead.
pub async fn execute_command(
    command: Option<Commands>,
    settings: &BootstrapSettings,
    env: &dyn EnvironmentProvider,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        None | Some(Commands::Serve) => Ok(false),
        Some(Commands::Migrate) => {
            migrate::run_migrations(settings).await?;
            Ok(true)
        }
        Some(Commands::CreateUser {
            login,
            password,
            full_name,
            phone,
            role,
        }) => {
            create_user::create_user(
                settings,
                env,
                create_user::UserArgs {
                    login,
                    password,
                    full_name,
                    phone,
                    role,
                },
            )
            .await?;
            Ok(true)
        }
    }
}
