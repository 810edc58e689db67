//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of server-side failure detail.
pub const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedPayload
        | ErrorCode::MalformedOrigin
        | ErrorCode::MalformedDestination
        | ErrorCode::InvalidParameters
        | ErrorCode::InvalidOrderId => StatusCode::BAD_REQUEST,
        ErrorCode::NoSuchOrder | ErrorCode::InvalidPath => StatusCode::NOT_FOUND,
        ErrorCode::DisallowedMethod => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::AlreadyTaken => StatusCode::CONFLICT,
        ErrorCode::DistanceLookupEmpty
        | ErrorCode::DistanceLookupFailed
        | ErrorCode::DistanceLookupMalformed => StatusCode::BAD_GATEWAY,
        ErrorCode::StoreWriteFailed | ErrorCode::UnknownState | ErrorCode::InternalFailure => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// Server faults keep their code so clients can branch on it, but lose the
// message and details, which may carry adapter internals.
fn redact_if_server_fault(error: &Error) -> Error {
    if error.is_server_fault() {
        let mut redacted = Error::new(error.code(), REDACTED_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_server_fault(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}
