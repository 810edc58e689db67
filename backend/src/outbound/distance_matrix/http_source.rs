//! Reqwest-backed Distance Matrix adapter.
//!
//! This adapter owns transport details only: query serialisation, timeout and
//! HTTP error mapping, and JSON decoding into a [`RouteDistance`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use zeroize::Zeroizing;

use super::dto::DistanceMatrixResponseDto;
use crate::domain::GeoPoint;
use crate::domain::ports::{DistanceLookup, DistanceLookupError, RouteDistance};

/// Public Google Distance Matrix JSON endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default bound on a single lookup, connect to last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Distance lookup adapter that issues HTTP GET requests against one endpoint.
pub struct DistanceMatrixHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl fmt::Debug for DistanceMatrixHttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceMatrixHttpSource")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl DistanceMatrixHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let source = DistanceMatrixHttpSource::new(endpoint, api_key, DEFAULT_TIMEOUT)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn request_url(&self, origin: &GeoPoint, destination: &GeoPoint) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("origins", &origin.to_string())
            .append_pair("destinations", &destination.to_string())
            .append_pair("key", self.api_key.as_str());
        url
    }
}

#[async_trait]
impl DistanceLookup for DistanceMatrixHttpSource {
    async fn distance(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteDistance, DistanceLookupError> {
        let response = self
            .client
            .get(self.request_url(origin, destination))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_route_distance(body.as_ref())
    }
}

fn parse_route_distance(body: &[u8]) -> Result<RouteDistance, DistanceLookupError> {
    let decoded: DistanceMatrixResponseDto = serde_json::from_slice(body).map_err(|error| {
        DistanceLookupError::decode(format!("invalid Distance Matrix JSON payload: {error}"))
    })?;
    decoded.into_route_distance()
}

// The request URL carries the API key, so it is stripped before the error is
// rendered.
fn map_transport_error(error: reqwest::Error) -> DistanceLookupError {
    let timed_out = error.is_timeout();
    let message = error.without_url().to_string();
    if timed_out {
        DistanceLookupError::timeout(message)
    } else {
        DistanceLookupError::transport(message)
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DistanceLookupError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DistanceLookupError::timeout(message)
        }
        _ => DistanceLookupError::rejected(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
