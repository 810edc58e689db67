//! Validation helpers for order request payloads.
//!
//! Coordinates arrive as two-element JSON arrays. Each element may be a
//! number or a decimal string, so both `[37.8, -122.2]` and
//! `["37.8", "-122.2"]` are accepted.

use serde_json::{Value, json};

use crate::domain::{Error, GeoPoint};

/// Which endpoint of the route a coordinate pair describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointField {
    Origin,
    Destination,
}

impl PointField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }

    fn error(self, reason: impl Into<String>) -> Error {
        let reason = reason.into();
        let message = format!("{} {reason}", self.as_str());
        let error = match self {
            Self::Origin => Error::malformed_origin(message),
            Self::Destination => Error::malformed_destination(message),
        };
        error.with_details(json!({ "field": self.as_str(), "reason": reason }))
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a `[latitude, longitude]` pair into a [`GeoPoint`].
///
/// A missing field, a non-array, a pair of the wrong length, an unparsable
/// element, or an out-of-range coordinate all produce the field's
/// `MALFORMED_*` error.
pub(crate) fn parse_point(value: Option<&Value>, field: PointField) -> Result<GeoPoint, Error> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| field.error("must be a [latitude, longitude] array"))?;
    let [latitude, longitude] = items.as_slice() else {
        return Err(field.error(format!(
            "must have exactly two coordinates, got {}",
            items.len()
        )));
    };
    let latitude = coordinate(latitude).ok_or_else(|| field.error("latitude is not a number"))?;
    let longitude =
        coordinate(longitude).ok_or_else(|| field.error("longitude is not a number"))?;

    GeoPoint::new(latitude, longitude).map_err(|err| field.error(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::strings(json!(["37.8093475", "-122.2740787"]))]
    #[case::numbers(json!([37.8093475, -122.2740787]))]
    #[case::mixed(json!([" 37.8093475 ", -122.2740787]))]
    fn accepts_string_and_number_pairs(#[case] value: Value) {
        let point = parse_point(Some(&value), PointField::Origin).expect("valid pair");
        assert!((point.latitude() - 37.809_347_5).abs() < 1e-9);
        assert!((point.longitude() + 122.274_078_7).abs() < 1e-9);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::not_array(Some(json!("37.8,-122.2")))]
    #[case::one_element(Some(json!(["37.8"])))]
    #[case::three_elements(Some(json!(["37.8", "-122.2", "0"])))]
    #[case::not_numeric(Some(json!(["north", "-122.2"])))]
    #[case::nested(Some(json!([[37.8], -122.2])))]
    #[case::out_of_range(Some(json!([91.0, 0.0])))]
    fn rejects_malformed_pairs(#[case] value: Option<Value>) {
        let origin = parse_point(value.as_ref(), PointField::Origin).expect_err("malformed");
        assert_eq!(origin.code(), ErrorCode::MalformedOrigin);
        assert_eq!(origin.details().and_then(|d| d["field"].as_str()), Some("origin"));

        let destination =
            parse_point(value.as_ref(), PointField::Destination).expect_err("malformed");
        assert_eq!(destination.code(), ErrorCode::MalformedDestination);
    }
}
