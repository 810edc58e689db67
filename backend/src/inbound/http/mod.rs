//! HTTP inbound adapter exposing the order REST endpoints.

pub mod error;
pub mod fallback;
pub mod health;
pub mod orders;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
