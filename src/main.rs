use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use service_center_backend::api::build_routes;
use service_center_backend::cli::{self, Cli};
use service_center_backend::config::{
    connect_database, init_logging, migrate_database, BootstrapSettings, SystemEnvironment,
};
use service_center_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let env = SystemEnvironment;
    init_logging(&env)?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;

    if cli::execute_command(cli.command, &settings, &env).await? {
        return Ok(());
    }

    let db = connect_database(&settings).await?;
    migrate_database(&db).await?;
    tracing::info!("Connected to database: {}", settings.database_url());

    let app_data = Arc::new(AppData::init(db, &settings, &env)?);

    let address = settings.server_address();
    let server_url = format!("http://{}", address);
    let app = build_routes(app_data, &server_url);

    tracing::info!("Starting server on {}", server_url);
    tracing::info!("Swagger UI available at {}/swagger", server_url);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
