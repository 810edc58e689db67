//! Order HTTP handlers.
//!
//! ```text
//! POST  /orders        Create an order between two coordinate pairs
//! GET   /orders        List orders, `?page=P&limit=L`
//! PATCH /orders/{id}   Claim an order
//! ```
//!
//! Any other method on these paths answers `405 DISALLOWED_METHOD`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use pagination::{PageParams, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{Error, Order, OrderId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::fallback::disallowed_method;
use crate::inbound::http::schemas::{ErrorSchema, OrderSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{PointField, parse_point};

/// Upper bound on a create payload; two coordinate pairs fit comfortably.
const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Body literal returned by a successful claim.
pub const CLAIM_SUCCESS: &str = "SUCCESS";

/// Create order request body.
///
/// Each point is a `[latitude, longitude]` pair of numbers or decimal
/// strings. Shape checks happen in the handler so a bad pair reports
/// `MALFORMED_ORIGIN` or `MALFORMED_DESTINATION` rather than a generic
/// payload error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Start of the route.
    #[schema(value_type = Vec<String>, example = json!(["37.8093475", "-122.2740787"]))]
    pub origin: Option<Value>,
    /// End of the route.
    #[schema(value_type = Vec<String>, example = json!(["37.8061044", "-122.2943356"]))]
    pub destination: Option<Value>,
}

/// Claim response body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClaimResponse {
    /// Always `SUCCESS`.
    #[schema(example = "SUCCESS")]
    pub status: String,
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::malformed_payload(format!("order payload is not valid JSON: {err}")).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_parameters(format!("invalid list parameters: {err}")).into()
}

/// Register the order resources and their extractor configuration.
///
/// ```rust,ignore
/// App::new().app_data(state).configure(orders::configure)
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .service(
        web::resource("/orders")
            .route(web::get().to(list_orders))
            .route(web::post().to(create_order))
            .default_service(web::to(disallowed_method)),
    )
    .service(
        web::resource("/orders/{id}")
            .route(web::patch().to(claim_order))
            .default_service(web::to(disallowed_method)),
    );
}

/// Create an order.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Created order", body = OrderSchema),
        (status = 400, description = "Malformed payload or coordinates", body = ErrorSchema),
        (status = 502, description = "Distance lookup failed", body = ErrorSchema),
        (status = 500, description = "Order could not be stored", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<web::Json<Order>> {
    let payload = payload.into_inner();
    let origin = parse_point(payload.origin.as_ref(), PointField::Origin)?;
    let destination = parse_point(payload.destination.as_ref(), PointField::Destination)?;

    let order = state.orders.create(origin, destination).await?;
    Ok(web::Json(order))
}

/// List orders in ascending id order.
///
/// `page` is a zero-based window index; the window starts at
/// `page * limit`.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index (default 0)"),
        ("limit" = Option<u64>, Query, description = "Page size, at most 1000 (default 50)")
    ),
    responses(
        (status = 200, description = "Orders in the window, possibly empty", body = [OrderSchema]),
        (status = 400, description = "Invalid parameters", body = ErrorSchema),
        (status = 500, description = "Stored data is inconsistent", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
pub async fn list_orders(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<Order>>> {
    let page = PageRequest::try_from(query.into_inner())
        .map_err(|err| Error::invalid_parameters(err.to_string()))?;

    let orders = state.orders.list(page).await?;
    Ok(web::Json(orders))
}

/// Claim an order.
#[utoipa::path(
    patch,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order claimed", body = ClaimResponse),
        (status = 400, description = "Invalid order id", body = ErrorSchema),
        (status = 404, description = "No such order", body = ErrorSchema),
        (status = 409, description = "Order already taken", body = ErrorSchema),
        (status = 500, description = "Claim did not complete", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "claimOrder"
)]
pub async fn claim_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let raw = path.into_inner();
    let id: OrderId = raw.parse().map_err(|err: crate::domain::OrderIdError| {
        Error::invalid_order_id(err.to_string()).with_details(json!({ "id": raw }))
    })?;

    state.orders.claim(id).await?;
    Ok(web::Json(ClaimResponse {
        status: CLAIM_SUCCESS.to_owned(),
    }))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
