//! Port for the external routing service that measures travel distance.

use async_trait::async_trait;

use crate::domain::{DistanceMetres, GeoPoint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by distance lookup adapters.
    pub enum DistanceLookupError {
        /// The request could not be sent or the response not read.
        Transport { message: String } =>
            "distance lookup transport failed: {message}",
        /// The service did not answer in time.
        Timeout { message: String } =>
            "distance lookup timed out: {message}",
        /// The service answered with a failure status.
        Rejected { message: String } =>
            "distance lookup rejected: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "distance lookup response malformed: {message}",
        /// The response carried no usable route.
        Empty { message: String } =>
            "distance lookup returned no route: {message}",
    }
}

/// Distance for the first route between two points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDistance {
    /// Distance in metres.
    pub metres: DistanceMetres,
    /// Human-readable rendering from the provider, e.g. `"2.5 km"`.
    pub text: String,
}

/// Narrow capability for measuring travel distance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    /// Measure the travel distance from `origin` to `destination`.
    async fn distance(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteDistance, DistanceLookupError>;
}

/// Deterministic lookup for tests.
///
/// Reports the great-circle distance between the points, rounded to whole
/// metres.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDistanceLookup;

const EARTH_RADIUS_METRES: f64 = 6_371_008.8;

fn haversine_metres(origin: &GeoPoint, destination: &GeoPoint) -> f64 {
    let (lat1, lat2) = (
        origin.latitude().to_radians(),
        destination.latitude().to_radians(),
    );
    let d_lat = lat2 - lat1;
    let d_lng = (destination.longitude() - origin.longitude()).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METRES * a.sqrt().asin()
}

#[async_trait]
impl DistanceLookup for FixtureDistanceLookup {
    async fn distance(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteDistance, DistanceLookupError> {
        // Finite and non-negative for validated points; `as` saturates anyway.
        let metres = DistanceMetres::new(haversine_metres(origin, destination).round() as u64);
        Ok(RouteDistance {
            metres,
            text: format!("{} m", metres.get()),
        })
    }
}
