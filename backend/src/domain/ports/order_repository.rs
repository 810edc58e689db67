//! Port for durable order storage.
//!
//! Rows travel back to the domain with their raw status literal so integrity
//! checks happen in one place rather than in each adapter.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{DistanceMetres, Order, OrderId, OrderState, UnknownOrderState};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order store adapters.
    pub enum OrderRepositoryError {
        /// The store could not be reached or a connection was lost.
        Connection { message: String } =>
            "order store connection failed: {message}",
        /// A read or update failed during execution.
        Query { message: String } =>
            "order store query failed: {message}",
        /// An insert failed.
        Write { message: String } =>
            "order store write failed: {message}",
        /// A row carries a status literal outside the state machine.
        UnknownState { value: String } =>
            "order store holds unknown status {value:?}",
    }
}

/// An order row exactly as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOrder {
    /// Store-assigned identifier.
    pub id: OrderId,
    /// Distance written at creation.
    pub distance: DistanceMetres,
    /// Raw status literal.
    pub status: String,
}

impl TryFrom<StoredOrder> for Order {
    type Error = UnknownOrderState;

    fn try_from(row: StoredOrder) -> Result<Self, Self::Error> {
        let state = row.status.parse::<OrderState>()?;
        Ok(Order::new(row.id, row.distance, state))
    }
}

/// Result of the claim protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The order moved from `UNASSIGNED` to `TAKEN` in this call.
    Claimed,
    /// No order has the requested identifier.
    NotFound,
    /// The order was already `TAKEN`; nothing changed.
    AlreadyTaken,
}

/// Port for creating, listing, and claiming orders.
///
/// `claim` must be atomic: for a given id, at most one caller ever observes
/// [`ClaimOutcome::Claimed`], however many race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new `UNASSIGNED` order and return the stored row.
    async fn insert(&self, distance: DistanceMetres) -> Result<StoredOrder, OrderRepositoryError>;

    /// Read the rows inside `window`, ordered by ascending id.
    async fn list(&self, window: PageWindow) -> Result<Vec<StoredOrder>, OrderRepositoryError>;

    /// Atomically move the order from `UNASSIGNED` to `TAKEN`.
    async fn claim(&self, id: OrderId) -> Result<ClaimOutcome, OrderRepositoryError>;
}
