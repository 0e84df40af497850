use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors get colored reports
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    // /health: liveness, /ready: database ping, /metrics: Prometheus
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::metrics_router());

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting devices API (30s shutdown timeout)"
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Devices API shutdown complete");
    Ok(())
}
