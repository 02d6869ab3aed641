//! Canonical place shape and normalization of server JSON.
//!
//! Server variants disagree on field names (`location` vs `geometry.location`,
//! `name` vs `shop_name`) and on coordinate encoding (numbers vs strings).
//! Everything is normalized here so the rest of the code reads one shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Geographic coordinate, always finite and in range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Why a coordinate or place record was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceError {
    #[error("place record is not an object")]
    NotAnObject,
    /// Neither `location` nor `geometry.location` is present
    #[error("place has no location")]
    MissingLocation,
    /// A coordinate field is absent or not numeric
    #[error("coordinate '{field}' is not a number: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("coordinate '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl LatLng {
    /// Validate a coordinate pair
    pub fn new(lat: f64, lng: f64) -> Result<Self, PlaceError> {
        check_range("lat", lat, 90.0)?;
        check_range("lng", lng, 180.0)?;
        Ok(Self { lat, lng })
    }

    /// Read `{lat, lng}` where each value is a number or a numeric string
    pub fn from_json(value: &Value) -> Result<Self, PlaceError> {
        let lat = coordinate(value, "lat")?;
        let lng = coordinate(value, "lng")?;
        Self::new(lat, lng)
    }

    /// "lat,lng" as stored by the backend
    pub fn to_pair_string(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), PlaceError> {
    if !value.is_finite() {
        return Err(PlaceError::NotNumeric {
            field,
            value: value.to_string(),
        });
    }
    if value.abs() > limit {
        return Err(PlaceError::OutOfRange { field, value });
    }
    Ok(())
}

fn coordinate(value: &Value, field: &'static str) -> Result<f64, PlaceError> {
    let raw = value.get(field).unwrap_or(&Value::Null);
    number_like(raw).ok_or_else(|| PlaceError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

/// Numbers pass through, strings are parsed; everything else is rejected.
fn number_like(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A geocoded point of interest, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub location: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Place {
    pub const DEFAULT_NAME: &'static str = "Marker";

    pub fn new(
        location: LatLng,
        name: Option<String>,
        place_id: Option<String>,
        rating: Option<f64>,
    ) -> Self {
        Self {
            location,
            name,
            place_id,
            rating,
        }
    }

    /// Normalize one raw place record from any server variant.
    pub fn from_json(value: &Value) -> Result<Self, PlaceError> {
        let obj = value.as_object().ok_or(PlaceError::NotAnObject)?;

        let location = obj
            .get("location")
            .filter(|v| !v.is_null())
            .or_else(|| obj.get("geometry").and_then(|g| g.get("location")))
            .filter(|v| !v.is_null())
            .ok_or(PlaceError::MissingLocation)?;
        let location = LatLng::from_json(location)?;

        let name = non_empty_str(obj.get("name")).or_else(|| non_empty_str(obj.get("shop_name")));
        let place_id = non_empty_str(obj.get("place_id"));

        let rating = match obj.get("rating") {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let rating = number_like(raw);
                if rating.is_none() {
                    tracing::warn!("Dropping malformed rating {} for {:?}", raw, name);
                }
                rating
            }
        };

        Ok(Self {
            location,
            name,
            place_id,
            rating,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_latlng_numbers() {
        let ll = LatLng::from_json(&json!({"lat": 35.5, "lng": 139.25})).unwrap();
        assert_eq!(ll, LatLng { lat: 35.5, lng: 139.25 });
    }

    #[test]
    fn test_latlng_numeric_strings() {
        let ll = LatLng::from_json(&json!({"lat": " 35.5", "lng": "139.25"})).unwrap();
        assert_eq!(ll.lat, 35.5);
        assert_eq!(ll.lng, 139.25);
    }

    #[test]
    fn test_latlng_rejects_text() {
        let err = LatLng::from_json(&json!({"lat": "north", "lng": 1.0})).unwrap_err();
        assert!(matches!(err, PlaceError::NotNumeric { field: "lat", .. }));
    }

    #[test]
    fn test_latlng_rejects_missing_field() {
        let err = LatLng::from_json(&json!({"lat": 1.0})).unwrap_err();
        assert!(matches!(err, PlaceError::NotNumeric { field: "lng", .. }));
    }

    #[test]
    fn test_latlng_rejects_non_finite_string() {
        assert!(LatLng::from_json(&json!({"lat": "NaN", "lng": 1.0})).is_err());
        assert!(LatLng::from_json(&json!({"lat": 1.0, "lng": "inf"})).is_err());
    }

    #[test]
    fn test_latlng_rejects_out_of_range() {
        let err = LatLng::new(91.0, 0.0).unwrap_err();
        assert_eq!(err, PlaceError::OutOfRange { field: "lat", value: 91.0 });
        assert!(LatLng::new(0.0, -180.5).is_err());
        assert!(LatLng::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_place_from_location_and_name() {
        let p = Place::from_json(&json!({
            "location": {"lat": 35.0, "lng": 139.0},
            "name": "Cafe",
            "place_id": "abc",
            "rating": 4.5
        }))
        .unwrap();
        assert_eq!(p.display_name(), "Cafe");
        assert_eq!(p.place_id.as_deref(), Some("abc"));
        assert_eq!(p.rating, Some(4.5));
    }

    #[test]
    fn test_place_from_geometry_and_shop_name() {
        let p = Place::from_json(&json!({
            "geometry": {"location": {"lat": "35.1", "lng": "139.1"}},
            "shop_name": "Ramen",
            "radius": 1500
        }))
        .unwrap();
        assert_eq!(p.location, LatLng { lat: 35.1, lng: 139.1 });
        assert_eq!(p.display_name(), "Ramen");
        assert!(p.place_id.is_none());
    }

    #[test]
    fn test_place_location_wins_over_geometry() {
        let p = Place::from_json(&json!({
            "location": {"lat": 1.0, "lng": 2.0},
            "geometry": {"location": {"lat": 3.0, "lng": 4.0}}
        }))
        .unwrap();
        assert_eq!(p.location, LatLng { lat: 1.0, lng: 2.0 });
    }

    #[test]
    fn test_place_default_name() {
        let p = Place::from_json(&json!({"location": {"lat": 1.0, "lng": 2.0}, "name": ""})).unwrap();
        assert!(p.name.is_none());
        assert_eq!(p.display_name(), Place::DEFAULT_NAME);
    }

    #[test]
    fn test_place_missing_location() {
        assert_eq!(
            Place::from_json(&json!({"name": "nowhere"})).unwrap_err(),
            PlaceError::MissingLocation
        );
        assert_eq!(Place::from_json(&json!("text")).unwrap_err(), PlaceError::NotAnObject);
    }

    #[test]
    fn test_place_malformed_rating_is_dropped() {
        let p = Place::from_json(&json!({
            "location": {"lat": 1.0, "lng": 2.0},
            "rating": "great"
        }))
        .unwrap();
        assert!(p.rating.is_none());
    }

    #[test]
    fn test_place_canonical_serialization() {
        let p = Place::new(LatLng::new(1.0, 2.0).unwrap(), Some("A".into()), None, Some(3.0));
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, json!({"location": {"lat": 1.0, "lng": 2.0}, "name": "A", "rating": 3.0}));
    }
}
