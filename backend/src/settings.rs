//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, then `ORDERS_*` environment variables, then an
//! optional configuration file. Every field is optional; accessors apply the
//! defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_CLAIM_TIMEOUT, DEFAULT_STORE_TIMEOUT};
use crate::outbound::distance_matrix;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Failures turning raw settings into typed values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("bind_addr {value:?} is not a socket address: {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// `distance_endpoint` is not a URL.
    #[error("distance_endpoint {value:?} is not a URL: {source}")]
    DistanceEndpoint {
        /// Configured value.
        value: String,
        /// Parse failure.
        source: url::ParseError,
    },
}

/// Configuration values for the order service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORDERS")]
pub struct OrderServiceSettings {
    /// Address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Google Maps API key for the distance lookup.
    pub maps_api_key: Option<String>,
    /// Distance Matrix endpoint override.
    pub distance_endpoint: Option<String>,
    /// Per-lookup timeout in milliseconds.
    pub distance_timeout_ms: Option<u64>,
    /// Claim transaction deadline in milliseconds.
    pub claim_timeout_ms: Option<u64>,
    /// Insert and list deadline in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Leave the schema alone at startup instead of applying embedded
    /// migrations.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_timeout_secs: Option<u64>,
}

impl OrderServiceSettings {
    /// Return the listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Return the API key, treating an empty value as unset.
    pub fn maps_api_key(&self) -> Option<&str> {
        self.maps_api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Return the Distance Matrix endpoint, falling back to Google's.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DistanceEndpoint`] when the value does not parse.
    pub fn distance_endpoint(&self) -> Result<Url, SettingsError> {
        let value = self
            .distance_endpoint
            .as_deref()
            .unwrap_or(distance_matrix::DEFAULT_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::DistanceEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the per-lookup timeout.
    pub fn distance_timeout(&self) -> Duration {
        self.distance_timeout_ms
            .map_or(distance_matrix::DEFAULT_TIMEOUT, Duration::from_millis)
    }

    /// Return the claim deadline.
    pub fn claim_timeout(&self) -> Duration {
        self.claim_timeout_ms
            .map_or(DEFAULT_CLAIM_TIMEOUT, Duration::from_millis)
    }

    /// Return the insert and list deadline.
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout_ms
            .map_or(DEFAULT_STORE_TIMEOUT, Duration::from_millis)
    }

    /// Return the pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Return whether embedded migrations run at startup. Defaults to true.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    /// Return the shutdown grace period in seconds.
    pub fn shutdown_timeout_secs(&self) -> u64 {
        self.shutdown_timeout_secs
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS)
    }
}
