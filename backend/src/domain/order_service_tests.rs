//! Tests for the order lifecycle service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::{PageRequest, PageWindow};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockDistanceLookup, MockOrderRepository, OrderRepositoryError, RouteDistance,
};
use crate::domain::{DistanceMetres, ErrorCode, OrderState};

fn id(value: i64) -> OrderId {
    OrderId::new(value).expect("positive id")
}

fn stored(value: i64, distance: u64, status: &str) -> StoredOrder {
    StoredOrder {
        id: id(value),
        distance: DistanceMetres::new(distance),
        status: status.to_owned(),
    }
}

#[fixture]
fn origin() -> GeoPoint {
    GeoPoint::new(37.809_347_5, -122.274_078_7).expect("valid origin")
}

#[fixture]
fn destination() -> GeoPoint {
    GeoPoint::new(37.793_770_5, -122.402_016_6).expect("valid destination")
}

fn lookup_returning(metres: u64) -> MockDistanceLookup {
    let mut lookup = MockDistanceLookup::new();
    lookup.expect_distance().times(1).return_once(move |_, _| {
        Ok(RouteDistance {
            metres: DistanceMetres::new(metres),
            text: format!("{metres} m"),
        })
    });
    lookup
}

fn lookup_failing(error: DistanceLookupError) -> MockDistanceLookup {
    let mut lookup = MockDistanceLookup::new();
    lookup
        .expect_distance()
        .times(1)
        .return_once(move |_, _| Err(error));
    lookup
}

fn service(
    repo: MockOrderRepository,
    lookup: MockDistanceLookup,
) -> OrderLifecycleService<MockOrderRepository, MockDistanceLookup> {
    OrderLifecycleService::new(Arc::new(repo), Arc::new(lookup))
}

#[rstest]
#[tokio::test]
async fn create_inserts_looked_up_distance(origin: GeoPoint, destination: GeoPoint) {
    let mut repo = MockOrderRepository::new();
    repo.expect_insert()
        .withf(|distance| distance.get() == 2489)
        .times(1)
        .return_once(|_| Ok(stored(1, 2489, "UNASSIGNED")));

    let order = service(repo, lookup_returning(2489))
        .create(origin, destination)
        .await
        .expect("create succeeds");

    assert_eq!(order.id(), id(1));
    assert_eq!(order.distance().get(), 2489);
    assert_eq!(order.state(), OrderState::Unassigned);
}

#[rstest]
#[case::transport(DistanceLookupError::transport("reset"), ErrorCode::DistanceLookupFailed)]
#[case::timeout(DistanceLookupError::timeout("3s"), ErrorCode::DistanceLookupFailed)]
#[case::rejected(DistanceLookupError::rejected("status 403"), ErrorCode::DistanceLookupFailed)]
#[case::decode(DistanceLookupError::decode("eof"), ErrorCode::DistanceLookupMalformed)]
#[case::empty(DistanceLookupError::empty("no rows"), ErrorCode::DistanceLookupEmpty)]
#[tokio::test]
async fn create_maps_lookup_failures_without_touching_the_store(
    origin: GeoPoint,
    destination: GeoPoint,
    #[case] failure: DistanceLookupError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_insert().times(0);

    let err = service(repo, lookup_failing(failure))
        .create(origin, destination)
        .await
        .expect_err("lookup failure propagates");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn create_maps_insert_failure_to_store_write_failed(
    origin: GeoPoint,
    destination: GeoPoint,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(OrderRepositoryError::write("unique violation")));

    let err = service(repo, lookup_returning(10))
        .create(origin, destination)
        .await
        .expect_err("insert failure propagates");

    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);
}

#[tokio::test]
async fn list_reads_the_requested_window_in_order() {
    let mut repo = MockOrderRepository::new();
    repo.expect_list()
        .withf(|window: &PageWindow| window.offset() == 3 && window.limit() == 3)
        .times(1)
        .return_once(|_| {
            Ok(vec![
                stored(4, 6601, "UNASSIGNED"),
                stored(5, 9318, "TAKEN"),
                stored(6, 22475, "UNASSIGNED"),
            ])
        });

    let page = PageRequest::new(1, 3).expect("valid page");
    let orders = service(repo, MockDistanceLookup::new())
        .list(page)
        .await
        .expect("list succeeds");

    let ids: Vec<i64> = orders.iter().map(|order| order.id().get()).collect();
    assert_eq!(ids, vec![4, 5, 6]);
    assert_eq!(orders[1].state(), OrderState::Taken);
}

#[tokio::test]
async fn list_fails_whole_call_on_unknown_status() {
    let mut repo = MockOrderRepository::new();
    repo.expect_list().times(1).return_once(|_| {
        Ok(vec![
            stored(1, 10, "UNASSIGNED"),
            stored(2, 20, "INITAL"),
        ])
    });

    let err = service(repo, MockDistanceLookup::new())
        .list(PageRequest::default())
        .await
        .expect_err("unknown status is fatal");

    assert_eq!(err.code(), ErrorCode::UnknownState);
    assert_eq!(
        err.details().and_then(|d| d.get("status")).and_then(|s| s.as_str()),
        Some("INITAL")
    );
}

#[rstest]
#[case(OrderRepositoryError::unknown_state("PENDING"), ErrorCode::UnknownState)]
#[case(OrderRepositoryError::query("syntax"), ErrorCode::InternalFailure)]
#[case(OrderRepositoryError::connection("refused"), ErrorCode::InternalFailure)]
#[tokio::test]
async fn list_maps_store_failures(
    #[case] failure: OrderRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_list().times(1).return_once(move |_| Err(failure));

    let err = service(repo, MockDistanceLookup::new())
        .list(PageRequest::default())
        .await
        .expect_err("store failure propagates");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(Ok(ClaimOutcome::Claimed), None)]
#[case(Ok(ClaimOutcome::NotFound), Some(ErrorCode::NoSuchOrder))]
#[case(Ok(ClaimOutcome::AlreadyTaken), Some(ErrorCode::AlreadyTaken))]
#[case(Err(OrderRepositoryError::unknown_state("INITAL")), Some(ErrorCode::InternalFailure))]
#[case(Err(OrderRepositoryError::connection("gone")), Some(ErrorCode::InternalFailure))]
#[tokio::test]
async fn claim_maps_outcomes(
    #[case] outcome: Result<ClaimOutcome, OrderRepositoryError>,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockOrderRepository::new();
    repo.expect_claim()
        .withf(|order_id| order_id.get() == 7)
        .times(1)
        .return_once(move |_| outcome);

    let result = service(repo, MockDistanceLookup::new()).claim(id(7)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

/// Store whose calls never finish within a test's lifetime.
struct StallingRepository;

#[async_trait]
impl OrderRepository for StallingRepository {
    async fn insert(&self, _distance: DistanceMetres) -> Result<StoredOrder, OrderRepositoryError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(OrderRepositoryError::write("unreachable"))
    }

    async fn list(&self, _window: PageWindow) -> Result<Vec<StoredOrder>, OrderRepositoryError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn claim(&self, _id: OrderId) -> Result<ClaimOutcome, OrderRepositoryError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ClaimOutcome::Claimed)
    }
}

fn stalling_service(
    lookup: MockDistanceLookup,
) -> OrderLifecycleService<StallingRepository, MockDistanceLookup> {
    OrderLifecycleService::new(Arc::new(StallingRepository), Arc::new(lookup))
        .with_claim_timeout(Duration::from_millis(20))
        .with_store_timeout(Duration::from_millis(20))
}

#[tokio::test]
async fn claim_deadline_reports_internal_failure() {
    let err = stalling_service(MockDistanceLookup::new())
        .claim(id(1))
        .await
        .expect_err("deadline expires");
    assert_eq!(err.code(), ErrorCode::InternalFailure);
    assert!(err.message().contains("exceeded 20 ms"));
}

#[rstest]
#[tokio::test]
async fn create_deadline_reports_store_write_failed(origin: GeoPoint, destination: GeoPoint) {
    let err = stalling_service(lookup_returning(5))
        .create(origin, destination)
        .await
        .expect_err("deadline expires");
    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);
}

#[tokio::test]
async fn list_deadline_reports_internal_failure() {
    let err = stalling_service(MockDistanceLookup::new())
        .list(PageRequest::default())
        .await
        .expect_err("deadline expires");
    assert_eq!(err.code(), ErrorCode::InternalFailure);
}
