//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed order store using Diesel
//! - **memory**: process-local order store for development and tests
//! - **distance_matrix**: Google Distance Matrix client behind `DistanceLookup`
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod distance_matrix;
pub mod memory;
pub mod persistence;
