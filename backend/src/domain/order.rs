//! Order entity, its state machine, and the geographic input it is built from.
//!
//! An order is created `UNASSIGNED` with a distance fixed at creation and
//! moves to `TAKEN` exactly once. The transition rule lives in
//! [`OrderState::claim`]; store adapters apply it inside their transactions
//! rather than re-implementing it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Store-assigned order identifier.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(i64);

/// Rejection raised when an order identifier is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("order id must be a positive integer, got {raw:?}")]
pub struct OrderIdError {
    raw: String,
}

impl OrderId {
    /// Wrap a store identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrderIdError`] when `value` is zero or negative.
    pub fn new(value: i64) -> Result<Self, OrderIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(OrderIdError {
                raw: value.to_string(),
            })
        }
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rejected = || OrderIdError { raw: s.to_owned() };
        // `i64::from_str` accepts a leading `+`, which is not an id.
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(rejected());
        }
        s.parse::<i64>()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or_else(rejected)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Travel distance in metres, fixed when the order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DistanceMetres(u64);

impl DistanceMetres {
    /// Wrap a distance in metres.
    #[must_use]
    pub const fn new(metres: u64) -> Self {
        Self(metres)
    }

    /// Distance in metres.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Created and waiting to be claimed.
    Unassigned,
    /// Claimed by exactly one caller.
    Taken,
}

/// Reasons a claim transition is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClaimRejection {
    /// The order was already claimed.
    #[error("order is already taken")]
    AlreadyTaken,
}

/// A stored status literal that is not part of the state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status {value:?}")]
pub struct UnknownOrderState {
    /// Literal read from the store.
    pub value: String,
}

impl OrderState {
    /// Stored literal for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "UNASSIGNED",
            Self::Taken => "TAKEN",
        }
    }

    /// Apply the claim transition.
    ///
    /// `UNASSIGNED` becomes `TAKEN`; anything else is refused. There is no
    /// transition out of `TAKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimRejection::AlreadyTaken`] when the order is `TAKEN`.
    ///
    /// # Examples
    /// ```
    /// use order_service::domain::{ClaimRejection, OrderState};
    ///
    /// assert_eq!(OrderState::Unassigned.claim(), Ok(OrderState::Taken));
    /// assert_eq!(OrderState::Taken.claim(), Err(ClaimRejection::AlreadyTaken));
    /// ```
    pub const fn claim(self) -> Result<Self, ClaimRejection> {
        match self {
            Self::Unassigned => Ok(Self::Taken),
            Self::Taken => Err(ClaimRejection::AlreadyTaken),
        }
    }
}

impl FromStr for OrderState {
    type Err = UnknownOrderState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNASSIGNED" => Ok(Self::Unassigned),
            "TAKEN" => Ok(Self::Taken),
            other => Err(UnknownOrderState {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery order as returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    distance: DistanceMetres,
    #[serde(rename = "status")]
    state: OrderState,
}

impl Order {
    /// Assemble an order from its parts.
    #[must_use]
    pub const fn new(id: OrderId, distance: DistanceMetres, state: OrderState) -> Self {
        Self {
            id,
            distance,
            state,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Distance fixed at creation.
    #[must_use]
    pub const fn distance(&self) -> DistanceMetres {
        self.distance
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> OrderState {
        self.state
    }
}

/// Validation failures for [`GeoPoint`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoPointError {
    /// Latitude is NaN, infinite, or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude is NaN, infinite, or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and build a point.
    ///
    /// # Errors
    ///
    /// Returns [`GeoPointError`] when either coordinate is not finite or is
    /// out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Renders as `lat,lng`, the form routing APIs expect.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
