//! Driving port for the order use-cases exposed to inbound adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, GeoPoint, Order, OrderId};

/// Create, list, and claim orders.
///
/// Inbound adapters validate raw input into the domain types first; every
/// failure returned here is already classified by [`crate::domain::ErrorCode`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLifecycle: Send + Sync {
    /// Measure the route and store a new `UNASSIGNED` order.
    async fn create(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Order, Error>;

    /// Read one page of orders in ascending id order.
    async fn list(&self, page: PageRequest) -> Result<Vec<Order>, Error>;

    /// Claim an order for the caller. Succeeds for exactly one caller per id.
    async fn claim(&self, id: OrderId) -> Result<(), Error>;
}
