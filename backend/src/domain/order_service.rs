//! Order lifecycle service.
//!
//! Implements the [`OrderLifecycle`] driving port on top of the
//! [`OrderRepository`] and [`DistanceLookup`] driven ports. The service holds
//! no locks; claim atomicity is delegated to the store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ClaimOutcome, DistanceLookup, DistanceLookupError, OrderLifecycle, OrderRepository,
    OrderRepositoryError, StoredOrder,
};
use crate::domain::{Error, GeoPoint, Order, OrderId};

/// Upper bound on the whole claim protocol.
pub const DEFAULT_CLAIM_TIMEOUT: Duration = Duration::from_secs(2);

/// Upper bound on create and list store calls.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

fn map_lookup_error(error: DistanceLookupError) -> Error {
    let message = error.to_string();
    match error {
        DistanceLookupError::Transport { .. }
        | DistanceLookupError::Timeout { .. }
        | DistanceLookupError::Rejected { .. } => Error::distance_lookup_failed(message),
        DistanceLookupError::Decode { .. } => Error::distance_lookup_malformed(message),
        DistanceLookupError::Empty { .. } => Error::distance_lookup_empty(message),
    }
}

fn unknown_state(value: String) -> Error {
    error!(status = %value, "order row holds a status outside the state machine");
    Error::unknown_state(format!("stored order status {value:?} is not recognised"))
        .with_details(json!({ "status": value }))
}

fn map_list_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::UnknownState { value } => unknown_state(value),
        other => Error::internal(other.to_string()),
    }
}

fn map_claim_error(id: OrderId, error: OrderRepositoryError) -> Error {
    if let OrderRepositoryError::UnknownState { value } = &error {
        error!(order_id = %id, status = %value, "integrity fault while claiming order");
    }
    Error::internal(format!("claim on order {id} failed: {error}"))
}

fn order_from_row(row: StoredOrder) -> Result<Order, Error> {
    Order::try_from(row).map_err(|err| unknown_state(err.value))
}

/// Order lifecycle service implementing [`OrderLifecycle`].
#[derive(Clone)]
pub struct OrderLifecycleService<R, D> {
    orders: Arc<R>,
    distances: Arc<D>,
    claim_timeout: Duration,
    store_timeout: Duration,
}

impl<R, D> OrderLifecycleService<R, D> {
    /// Create a service with the default deadlines.
    pub fn new(orders: Arc<R>, distances: Arc<D>) -> Self {
        Self {
            orders,
            distances,
            claim_timeout: DEFAULT_CLAIM_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the claim deadline.
    #[must_use]
    pub fn with_claim_timeout(mut self, claim_timeout: Duration) -> Self {
        self.claim_timeout = claim_timeout;
        self
    }

    /// Override the deadline for create and list store calls.
    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }
}

#[async_trait]
impl<R, D> OrderLifecycle for OrderLifecycleService<R, D>
where
    R: OrderRepository,
    D: DistanceLookup,
{
    async fn create(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Order, Error> {
        let route = self
            .distances
            .distance(&origin, &destination)
            .await
            .map_err(map_lookup_error)?;

        let row = timeout(self.store_timeout, self.orders.insert(route.metres))
            .await
            .map_err(|_| {
                Error::store_write_failed(format!(
                    "order insert exceeded {} ms",
                    self.store_timeout.as_millis()
                ))
            })?
            .map_err(|err| Error::store_write_failed(err.to_string()))?;

        let order = order_from_row(row)?;
        info!(
            order_id = %order.id(),
            distance_metres = order.distance().get(),
            route = %route.text,
            "order created"
        );
        Ok(order)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Order>, Error> {
        let rows = timeout(self.store_timeout, self.orders.list(page.window()))
            .await
            .map_err(|_| {
                Error::internal(format!(
                    "order listing exceeded {} ms",
                    self.store_timeout.as_millis()
                ))
            })?
            .map_err(map_list_error)?;

        rows.into_iter().map(order_from_row).collect()
    }

    async fn claim(&self, id: OrderId) -> Result<(), Error> {
        let outcome = timeout(self.claim_timeout, self.orders.claim(id))
            .await
            .map_err(|_| {
                warn!(order_id = %id, "claim deadline expired");
                Error::internal(format!(
                    "claim on order {id} exceeded {} ms",
                    self.claim_timeout.as_millis()
                ))
            })?
            .map_err(|err| map_claim_error(id, err))?;

        match outcome {
            ClaimOutcome::Claimed => {
                info!(order_id = %id, "order claimed");
                Ok(())
            }
            ClaimOutcome::NotFound => Err(Error::no_such_order(format!(
                "order {id} does not exist"
            ))),
            ClaimOutcome::AlreadyTaken => Err(Error::already_taken(format!(
                "order {id} is already taken"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
