//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Delivery orders.
    ///
    /// `id` is a `BIGSERIAL`, so identifiers are never reused.
    orders (id) {
        /// Primary key assigned by the sequence.
        id -> Int8,
        /// Route distance in metres, written once at insert.
        distance -> Int8,
        /// Lifecycle literal: `UNASSIGNED` or `TAKEN`.
        status -> Varchar,
    }
}
