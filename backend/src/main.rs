//! Order service entry-point: loads settings, prepares the order store and
//! distance lookup, and serves the HTTP API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use order_service::inbound::http::health::HealthState;
use order_service::outbound::distance_matrix::DistanceMatrixHttpSource;
use order_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use order_service::settings::OrderServiceSettings;

use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Environment variable consulted when `ORDERS_MAPS_API_KEY` is unset.
const LEGACY_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

fn api_key(settings: &OrderServiceSettings) -> color_eyre::Result<Zeroizing<String>> {
    let key = settings
        .maps_api_key()
        .map(str::to_owned)
        .or_else(|| {
            std::env::var(LEGACY_API_KEY_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| eyre!("a Google Maps API key is required (ORDERS_MAPS_API_KEY)"))?;
    Ok(Zeroizing::new(key))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = OrderServiceSettings::load().wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;

    let distances = DistanceMatrixHttpSource::new(
        settings.distance_endpoint()?,
        api_key(&settings)?,
        settings.distance_timeout(),
    )
    .wrap_err("failed to build the distance lookup client")?;

    let mut config = ServerConfig::new(bind_addr, Arc::new(distances))
        .with_timeouts(settings.claim_timeout(), settings.store_timeout())
        .with_shutdown_timeout_secs(settings.shutdown_timeout_secs());

    if let Some(url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(url)
                .await
                .wrap_err("failed to migrate the order store")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url)
                .with_max_size(settings.db_max_connections())
                .with_connection_timeout(settings.store_timeout()),
        )
        .await
        .wrap_err("failed to connect to the order store")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(health_state, shutdown_signal()));
    info!(%bind_addr, "order service listening");

    server.await?;
    info!("order service stopped");
    Ok(())
}
