//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use order_service::domain::{DEFAULT_CLAIM_TIMEOUT, DEFAULT_STORE_TIMEOUT};
use order_service::outbound::distance_matrix::DistanceMatrixHttpSource;
use order_service::outbound::persistence::DbPool;

const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) distances: Arc<DistanceMatrixHttpSource>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) claim_timeout: Duration,
    pub(crate) store_timeout: Duration,
    pub(crate) shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Construct a configuration that stores orders in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, distances: Arc<DistanceMatrixHttpSource>) -> Self {
        Self {
            bind_addr,
            distances,
            db_pool: None,
            claim_timeout: DEFAULT_CLAIM_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, orders are stored in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the claim and store deadlines.
    #[must_use]
    pub fn with_timeouts(mut self, claim_timeout: Duration, store_timeout: Duration) -> Self {
        self.claim_timeout = claim_timeout;
        self.store_timeout = store_timeout;
        self
    }

    /// Override the graceful shutdown window.
    #[must_use]
    pub fn with_shutdown_timeout_secs(mut self, secs: u64) -> Self {
        self.shutdown_timeout_secs = secs;
        self
    }
}
