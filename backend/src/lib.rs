//! Order service library: domain, adapters, and HTTP surface.
//!
//! The domain owns the order state machine and the lifecycle use-cases.
//! Inbound adapters expose them over HTTP; outbound adapters provide the
//! PostgreSQL or in-memory store and the Distance Matrix lookup.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
