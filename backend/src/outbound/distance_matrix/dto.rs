//! DTOs for decoding Distance Matrix JSON responses.
//!
//! Only the fields the adapter reads are modelled; unknown fields such as
//! `origin_addresses` and `duration` are ignored.

use serde::Deserialize;

use crate::domain::DistanceMetres;
use crate::domain::ports::{DistanceLookupError, RouteDistance};

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub(super) struct DistanceMatrixResponseDto {
    pub(super) status: Option<String>,
    pub(super) error_message: Option<String>,
    #[serde(default)]
    pub(super) rows: Vec<DistanceMatrixRowDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DistanceMatrixRowDto {
    #[serde(default)]
    pub(super) elements: Vec<DistanceMatrixElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DistanceMatrixElementDto {
    pub(super) status: Option<String>,
    pub(super) distance: Option<DistanceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DistanceDto {
    pub(super) value: u64,
    #[serde(default)]
    pub(super) text: String,
}

impl DistanceMatrixResponseDto {
    /// Pick the distance of the first element of the first row.
    pub(super) fn into_route_distance(self) -> Result<RouteDistance, DistanceLookupError> {
        if let Some(status) = self.status.as_deref().filter(|status| *status != STATUS_OK) {
            let message = match self.error_message {
                Some(detail) => format!("status {status}: {detail}"),
                None => format!("status {status}"),
            };
            return Err(DistanceLookupError::rejected(message));
        }

        let row = self
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| DistanceLookupError::empty("response has no rows"))?;
        let element = row
            .elements
            .into_iter()
            .next()
            .ok_or_else(|| DistanceLookupError::empty("first row has no elements"))?;

        if let Some(status) = element.status.as_deref().filter(|status| *status != STATUS_OK) {
            return Err(DistanceLookupError::empty(format!(
                "first element has status {status}"
            )));
        }
        let distance = element
            .distance
            .ok_or_else(|| DistanceLookupError::empty("first element has no distance"))?;

        Ok(RouteDistance {
            metres: DistanceMetres::new(distance.value),
            text: distance.text,
        })
    }
}
