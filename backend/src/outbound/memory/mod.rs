//! In-memory `OrderRepository` for local runs and tests.
//!
//! A single async mutex guards the table, so the claim read-check-write is
//! atomic within one process. Identifiers are never reused, matching the
//! `BIGSERIAL` column of the PostgreSQL store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::PageWindow;
use tokio::sync::Mutex;

use crate::domain::ports::{ClaimOutcome, OrderRepository, OrderRepositoryError, StoredOrder};
use crate::domain::{ClaimRejection, DistanceMetres, OrderId, OrderState};

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, (DistanceMetres, String)>,
}

/// Order store held in process memory.
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    table: Mutex<Table>,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryOrderRepository {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the raw status of an existing row.
    ///
    /// Lets tests stage integrity faults that the port itself cannot produce.
    /// Returns `false` when no row has `id`.
    #[doc(hidden)]
    pub async fn force_status(&self, id: OrderId, status: &str) -> bool {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id.get()) {
            Some((_, stored)) => {
                status.clone_into(stored);
                true
            }
            None => false,
        }
    }
}

fn stored(
    id: i64,
    distance: DistanceMetres,
    status: &str,
) -> Result<StoredOrder, OrderRepositoryError> {
    let id = OrderId::new(id)
        .map_err(|err| OrderRepositoryError::query(format!("corrupt order id: {err}")))?;
    Ok(StoredOrder {
        id,
        distance,
        status: status.to_owned(),
    })
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, distance: DistanceMetres) -> Result<StoredOrder, OrderRepositoryError> {
        let mut table = self.table.lock().await;
        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| OrderRepositoryError::write("order id sequence exhausted"))?;
        let status = OrderState::Unassigned.as_str();
        table.rows.insert(id, (distance, status.to_owned()));
        stored(id, distance, status)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<StoredOrder>, OrderRepositoryError> {
        let table = self.table.lock().await;
        let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        table
            .rows
            .iter()
            .skip(skip)
            .take(take)
            .map(|(id, (distance, status))| stored(*id, *distance, status))
            .collect()
    }

    async fn claim(&self, id: OrderId) -> Result<ClaimOutcome, OrderRepositoryError> {
        let mut table = self.table.lock().await;
        let Some((_, status)) = table.rows.get_mut(&id.get()) else {
            return Ok(ClaimOutcome::NotFound);
        };
        let current = status
            .parse::<OrderState>()
            .map_err(|err| OrderRepositoryError::unknown_state(err.value))?;
        match current.claim() {
            Ok(next) => {
                next.as_str().clone_into(status);
                Ok(ClaimOutcome::Claimed)
            }
            Err(ClaimRejection::AlreadyTaken) => Ok(ClaimOutcome::AlreadyTaken),
        }
    }
}
