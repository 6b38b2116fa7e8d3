//! Products API - REST server for the product catalog

use axum_helpers::server::{create_production_app, create_router};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use migration::Migrator;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        service = config.app.name,
        version = config.app.version,
        "Starting Products API"
    );

    let db = connect_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state))?;

    create_production_app(
        router,
        &config.server,
        config.shutdown_timeout,
        async move {
            info!("Shutting down: closing database pool");
            match state.db.close().await {
                Ok(()) => info!("Database pool closed"),
                Err(e) => warn!("Error closing database pool: {}", e),
            }
        },
    )
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
