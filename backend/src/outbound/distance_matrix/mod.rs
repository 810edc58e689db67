//! Google Distance Matrix outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `DistanceLookup`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DistanceMatrixHttpSource};
