//! PostgreSQL-backed `OrderRepository` implementation using Diesel.
//!
//! The claim protocol runs in one transaction: lock the row with
//! `SELECT ... FOR UPDATE`, apply [`OrderState::claim`], then update. The row
//! lock serialises concurrent claims on the same id, so only the first
//! committer sees `UNASSIGNED`.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::PageWindow;

use crate::domain::ports::{ClaimOutcome, OrderRepository, OrderRepositoryError, StoredOrder};
use crate::domain::{ClaimRejection, DEFAULT_CLAIM_TIMEOUT, DistanceMetres, OrderId, OrderState};

use super::diesel_error_mapping::{StatementKind, map_diesel_error, map_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::DbPool;
use super::schema::orders;

/// Diesel-backed implementation of the [`OrderRepository`] port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
    claim_statement_timeout: Duration,
}

impl DieselOrderRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            claim_statement_timeout: DEFAULT_CLAIM_TIMEOUT,
        }
    }

    /// Bound each statement of the claim transaction on the server side.
    #[must_use]
    pub fn with_claim_statement_timeout(mut self, timeout: Duration) -> Self {
        self.claim_statement_timeout = timeout;
        self
    }
}

/// Ways the claim transaction ends without committing an update.
///
/// Every variant rolls the transaction back.
#[derive(Debug)]
enum ClaimAbort {
    NotFound,
    AlreadyTaken,
    UnknownState(String),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for ClaimAbort {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

fn row_to_stored(row: OrderRow) -> Result<StoredOrder, OrderRepositoryError> {
    let id = OrderId::new(row.id)
        .map_err(|err| OrderRepositoryError::query(format!("corrupt order id: {err}")))?;
    let distance = u64::try_from(row.distance).map_err(|_| {
        OrderRepositoryError::query(format!(
            "order {id} has negative distance {}",
            row.distance
        ))
    })?;
    Ok(StoredOrder {
        id,
        distance: DistanceMetres::new(distance),
        status: row.status,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, distance: DistanceMetres) -> Result<StoredOrder, OrderRepositoryError> {
        let distance = i64::try_from(distance.get()).map_err(|_| {
            OrderRepositoryError::write(format!(
                "distance {} exceeds the column range",
                distance.get()
            ))
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                distance,
                status: OrderState::Unassigned.as_str(),
            })
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, StatementKind::Write))?;

        row_to_stored(row)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<StoredOrder>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OrderRow> = orders::table
            .select(OrderRow::as_select())
            .order_by(orders::id.asc())
            .limit(window.limit())
            .offset(window.offset())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, StatementKind::Read))?;

        rows.into_iter().map(row_to_stored).collect()
    }

    async fn claim(&self, id: OrderId) -> Result<ClaimOutcome, OrderRepositoryError> {
        let timeout_ms = self.claim_statement_timeout.as_millis().max(1);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Result<(), ClaimAbort> = conn
            .transaction(|conn| {
                async move {
                    // SET does not accept bind parameters; the value is an integer.
                    diesel::sql_query(format!("SET LOCAL statement_timeout = {timeout_ms}"))
                        .execute(conn)
                        .await?;

                    let status: Option<String> = orders::table
                        .find(id.get())
                        .select(orders::status)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;

                    let status = status.ok_or(ClaimAbort::NotFound)?;
                    let current = status
                        .parse::<OrderState>()
                        .map_err(|err| ClaimAbort::UnknownState(err.value))?;
                    let next = current.claim().map_err(|rejection| match rejection {
                        ClaimRejection::AlreadyTaken => ClaimAbort::AlreadyTaken,
                    })?;

                    diesel::update(orders::table.find(id.get()))
                        .set(orders::status.eq(next.as_str()))
                        .execute(conn)
                        .await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(()) => Ok(ClaimOutcome::Claimed),
            Err(ClaimAbort::NotFound) => Ok(ClaimOutcome::NotFound),
            Err(ClaimAbort::AlreadyTaken) => Ok(ClaimOutcome::AlreadyTaken),
            Err(ClaimAbort::UnknownState(value)) => {
                Err(OrderRepositoryError::unknown_state(value))
            }
            Err(ClaimAbort::Database(err)) => Err(map_diesel_error(err, StatementKind::Read)),
        }
    }
}
