use crate::config::{connect_database, migrate_database, BootstrapSettings};

/// Run database migrations
///
/// Connects and applies pending migrations without building AppData,
/// so no signing secret is needed.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    println!("✅ Migrations applied to {}", settings.database_url());

    Ok(())
}
