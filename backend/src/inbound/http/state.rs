//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::OrderLifecycle;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Create, list, and claim use-cases.
    pub orders: Arc<dyn OrderLifecycle>,
}

impl HttpState {
    /// Bundle the order lifecycle port for handlers.
    pub fn new(orders: Arc<dyn OrderLifecycle>) -> Self {
        Self { orders }
    }
}
