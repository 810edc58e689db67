//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is not a valid order payload.
    #[schema(rename = "MALFORMED_PAYLOAD")]
    MalformedPayload,
    /// The origin is not a valid coordinate pair.
    #[schema(rename = "MALFORMED_ORIGIN")]
    MalformedOrigin,
    /// The destination is not a valid coordinate pair.
    #[schema(rename = "MALFORMED_DESTINATION")]
    MalformedDestination,
    /// Query parameters are malformed, duplicated, or out of range.
    #[schema(rename = "INVALID_PARAMETERS")]
    InvalidParameters,
    /// The order identifier is not a positive integer.
    #[schema(rename = "INVALID_ORDER_ID")]
    InvalidOrderId,
    /// No endpoint exists at this path.
    #[schema(rename = "INVALID_PATH")]
    InvalidPath,
    /// The endpoint does not support this HTTP method.
    #[schema(rename = "DISALLOWED_METHOD")]
    DisallowedMethod,
    /// No order has this identifier.
    #[schema(rename = "NO_SUCH_ORDER")]
    NoSuchOrder,
    /// The order has already been claimed.
    #[schema(rename = "ALREADY_TAKEN")]
    AlreadyTaken,
    /// The routing service found no route.
    #[schema(rename = "DISTANCE_LOOKUP_EMPTY")]
    DistanceLookupEmpty,
    /// The routing service could not be reached or refused the request.
    #[schema(rename = "DISTANCE_LOOKUP_FAILED")]
    DistanceLookupFailed,
    /// The routing service answered with an unreadable body.
    #[schema(rename = "DISTANCE_LOOKUP_MALFORMED")]
    DistanceLookupMalformed,
    /// The order could not be stored.
    #[schema(rename = "STORE_WRITE_FAILED")]
    StoreWriteFailed,
    /// A stored order has an unrecognised status.
    #[schema(rename = "UNKNOWN_STATE")]
    UnknownState,
    /// An unexpected error occurred on the server.
    #[schema(rename = "INTERNAL_FAILURE")]
    InternalFailure,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "NO_SUCH_ORDER")]
    code: ErrorCodeSchema,
    /// Human-readable message. Redacted for 5xx responses.
    #[schema(example = "order 42 does not exist")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "6f1c1d1e-7c55-4a57-9a3b-3f8f0f9c2b11")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::OrderState`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OrderState)]
pub enum OrderStateSchema {
    /// Created and waiting to be claimed.
    #[schema(rename = "UNASSIGNED")]
    Unassigned,
    /// Claimed by exactly one caller.
    #[schema(rename = "TAKEN")]
    Taken,
}

/// OpenAPI schema for [`crate::domain::Order`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Order)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderSchema {
    /// Store-assigned identifier.
    #[schema(example = 42)]
    id: i64,
    /// Route distance in metres.
    #[schema(example = 6133)]
    distance: u64,
    /// Lifecycle state.
    status: OrderStateSchema,
}
