//! Domain primitives, ports, and the order lifecycle service.
//!
//! Purpose: define the order entity and its state machine, the ports that
//! adapters implement or call, and the service tying them together. Nothing
//! in this module knows about HTTP or SQL.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure taxonomy.
//! - `Order`, `OrderId`, `OrderState`, `DistanceMetres`, `GeoPoint`.
//! - `OrderLifecycleService`: implementation of the `OrderLifecycle` port.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod order;
pub mod order_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::order::{
    ClaimRejection, DistanceMetres, GeoPoint, GeoPointError, Order, OrderId, OrderIdError,
    OrderState, UnknownOrderState,
};
pub use self::order_service::{
    DEFAULT_CLAIM_TIMEOUT, DEFAULT_STORE_TIMEOUT, OrderLifecycleService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
