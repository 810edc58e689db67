//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map each
//! [`ErrorCode`] to a protocol status without inspecting message text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request body is not a JSON object with `origin` and `destination`.
    MalformedPayload,
    /// The origin is not a valid latitude/longitude pair.
    MalformedOrigin,
    /// The destination is not a valid latitude/longitude pair.
    MalformedDestination,
    /// Listing parameters are not valid page/limit values.
    InvalidParameters,
    /// The order identifier is not a positive integer.
    InvalidOrderId,
    /// No route matches the requested path.
    InvalidPath,
    /// The route exists but does not accept the request method.
    DisallowedMethod,
    /// No order exists with the requested identifier.
    NoSuchOrder,
    /// The order has already been claimed.
    AlreadyTaken,
    /// The distance service answered without a usable route.
    DistanceLookupEmpty,
    /// The distance service could not be reached or refused the request.
    DistanceLookupFailed,
    /// The distance service answered with an undecodable body.
    DistanceLookupMalformed,
    /// The order could not be written to the store.
    StoreWriteFailed,
    /// A stored order carries a status literal outside the state machine.
    UnknownState,
    /// Any other server-side failure.
    InternalFailure,
}

impl ErrorCode {
    /// Wire literal for the code, as serialised in error bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedPayload => "MALFORMED_PAYLOAD",
            Self::MalformedOrigin => "MALFORMED_ORIGIN",
            Self::MalformedDestination => "MALFORMED_DESTINATION",
            Self::InvalidParameters => "INVALID_PARAMETERS",
            Self::InvalidOrderId => "INVALID_ORDER_ID",
            Self::InvalidPath => "INVALID_PATH",
            Self::DisallowedMethod => "DISALLOWED_METHOD",
            Self::NoSuchOrder => "NO_SUCH_ORDER",
            Self::AlreadyTaken => "ALREADY_TAKEN",
            Self::DistanceLookupEmpty => "DISTANCE_LOOKUP_EMPTY",
            Self::DistanceLookupFailed => "DISTANCE_LOOKUP_FAILED",
            Self::DistanceLookupMalformed => "DISTANCE_LOOKUP_MALFORMED",
            Self::StoreWriteFailed => "STORE_WRITE_FAILED",
            Self::UnknownState => "UNKNOWN_STATE",
            Self::InternalFailure => "INTERNAL_FAILURE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// `Error::new` captures the trace identifier in scope, so errors built while
/// serving a request are correlated without extra plumbing.
///
/// # Examples
/// ```
/// use order_service::domain::{Error, ErrorCode};
///
/// let err = Error::no_such_order("order 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NoSuchOrder);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! error_constructors {
    ($($(#[$meta:meta])* $name:ident => $code:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )*
    };
}

impl Error {
    /// Create a new error, capturing the current trace identifier if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when one was in scope.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use order_service::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_parameters("bad limit").with_details(json!({ "field": "limit" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether the failure originated on the server rather than in the request.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::DistanceLookupEmpty
                | ErrorCode::DistanceLookupFailed
                | ErrorCode::DistanceLookupMalformed
                | ErrorCode::StoreWriteFailed
                | ErrorCode::UnknownState
                | ErrorCode::InternalFailure
        )
    }

    error_constructors! {
        /// Convenience constructor for [`ErrorCode::MalformedPayload`].
        malformed_payload => MalformedPayload,
        /// Convenience constructor for [`ErrorCode::MalformedOrigin`].
        malformed_origin => MalformedOrigin,
        /// Convenience constructor for [`ErrorCode::MalformedDestination`].
        malformed_destination => MalformedDestination,
        /// Convenience constructor for [`ErrorCode::InvalidParameters`].
        invalid_parameters => InvalidParameters,
        /// Convenience constructor for [`ErrorCode::InvalidOrderId`].
        invalid_order_id => InvalidOrderId,
        /// Convenience constructor for [`ErrorCode::InvalidPath`].
        invalid_path => InvalidPath,
        /// Convenience constructor for [`ErrorCode::DisallowedMethod`].
        disallowed_method => DisallowedMethod,
        /// Convenience constructor for [`ErrorCode::NoSuchOrder`].
        no_such_order => NoSuchOrder,
        /// Convenience constructor for [`ErrorCode::AlreadyTaken`].
        already_taken => AlreadyTaken,
        /// Convenience constructor for [`ErrorCode::DistanceLookupEmpty`].
        distance_lookup_empty => DistanceLookupEmpty,
        /// Convenience constructor for [`ErrorCode::DistanceLookupFailed`].
        distance_lookup_failed => DistanceLookupFailed,
        /// Convenience constructor for [`ErrorCode::DistanceLookupMalformed`].
        distance_lookup_malformed => DistanceLookupMalformed,
        /// Convenience constructor for [`ErrorCode::StoreWriteFailed`].
        store_write_failed => StoreWriteFailed,
        /// Convenience constructor for [`ErrorCode::UnknownState`].
        unknown_state => UnknownState,
        /// Convenience constructor for [`ErrorCode::InternalFailure`].
        internal => InternalFailure,
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Serialisation contract for domain errors.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::MalformedOrigin, "MALFORMED_ORIGIN")]
    #[case(ErrorCode::NoSuchOrder, "NO_SUCH_ORDER")]
    #[case(ErrorCode::DistanceLookupMalformed, "DISTANCE_LOOKUP_MALFORMED")]
    #[case(ErrorCode::InternalFailure, "INTERNAL_FAILURE")]
    fn codes_serialise_as_screaming_snake_case(#[case] code: ErrorCode, #[case] literal: &str) {
        let encoded = serde_json::to_value(code).expect("code serialises");
        assert_eq!(encoded, json!(literal));
        assert_eq!(code.as_str(), literal);
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let err = Error::already_taken("order 3 is already taken");
        let encoded = serde_json::to_value(&err).expect("error serialises");
        assert_eq!(
            encoded,
            json!({ "code": "ALREADY_TAKEN", "message": "order 3 is already taken" })
        );
    }

    #[tokio::test]
    async fn new_captures_scoped_trace_id() {
        let trace_id = TraceId::generate();
        let err = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(err.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[rstest]
    #[case(Error::store_write_failed("x"), true)]
    #[case(Error::distance_lookup_empty("x"), true)]
    #[case(Error::invalid_order_id("x"), false)]
    #[case(Error::already_taken("x"), false)]
    fn classifies_server_faults(#[case] err: Error, #[case] expected: bool) {
        assert_eq!(err.is_server_fault(), expected);
    }
}
