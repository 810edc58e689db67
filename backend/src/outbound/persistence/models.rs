//! Internal Diesel row structs for the `orders` table.
//!
//! These types never leave the persistence layer; the repository converts
//! them to [`StoredOrder`](crate::domain::ports::StoredOrder).

use diesel::prelude::*;

use super::schema::orders;

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i64,
    pub distance: i64,
    pub status: String,
}

/// Insertable struct for creating order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub distance: i64,
    pub status: &'a str,
}
