//! Handlers for requests that match no route or no method.

use actix_web::{HttpRequest, HttpResponse};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Resource-level default: the path exists but the method is not served.
pub async fn disallowed_method(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::disallowed_method(format!(
        "{} is not allowed on {}",
        req.method(),
        req.path()
    )))
}

/// App-level default: nothing is served at this path.
pub async fn invalid_path(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::invalid_path(format!("no endpoint at {}", req.path())))
}
