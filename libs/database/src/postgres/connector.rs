use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Connect with the default pool settings
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let max_connections = config.max_connections;
    let db = Database::connect(config.into_connect_options()).await?;
    info!(max_connections, "Connected to PostgreSQL");
    Ok(db)
}

/// Connect with exponential backoff, for databases that start alongside the service.
///
/// ```ignore
/// let retry = RetryConfig::new().with_max_retries(10);
/// let db = connect_from_config_with_retry(PostgresConfig::from_env()?, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(
        || connect_from_config(config.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
