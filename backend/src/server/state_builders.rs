//! Builders for the HTTP state and the order lifecycle behind it.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use order_service::domain::OrderLifecycleService;
use order_service::domain::ports::{DistanceLookup, OrderLifecycle, OrderRepository};
use order_service::inbound::http::state::HttpState;
use order_service::outbound::memory::InMemoryOrderRepository;
use order_service::outbound::persistence::DieselOrderRepository;

use super::ServerConfig;

fn lifecycle<R, D>(
    repository: R,
    distances: Arc<D>,
    config: &ServerConfig,
) -> Arc<dyn OrderLifecycle>
where
    R: OrderRepository + 'static,
    D: DistanceLookup + 'static,
{
    Arc::new(
        OrderLifecycleService::new(Arc::new(repository), distances)
            .with_claim_timeout(config.claim_timeout)
            .with_store_timeout(config.store_timeout),
    )
}

/// Build the HTTP state, choosing the order store from the configuration.
///
/// Uses PostgreSQL when a pool is configured, otherwise an in-memory store
/// whose contents are lost on exit.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let distances = Arc::clone(&config.distances);
    let orders = match &config.db_pool {
        Some(pool) => lifecycle(
            DieselOrderRepository::new(pool.clone())
                .with_claim_statement_timeout(config.claim_timeout),
            distances,
            config,
        ),
        None => {
            warn!("no database configured; orders are kept in memory and lost on exit");
            lifecycle(InMemoryOrderRepository::new(), distances, config)
        }
    };
    web::Data::new(HttpState::new(orders))
}
