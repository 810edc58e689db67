//! Domain ports and supporting types.
//!
//! Driven ports (`OrderRepository`, `DistanceLookup`) are implemented by
//! outbound adapters. The driving port (`OrderLifecycle`) is what inbound
//! adapters call.

mod distance_lookup;
mod macros;
mod order_lifecycle;
mod order_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use distance_lookup::MockDistanceLookup;
pub use distance_lookup::{
    DistanceLookup, DistanceLookupError, FixtureDistanceLookup, RouteDistance,
};
#[cfg(test)]
pub use order_lifecycle::MockOrderLifecycle;
pub use order_lifecycle::OrderLifecycle;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{ClaimOutcome, OrderRepository, OrderRepositoryError, StoredOrder};
