//! Wire types shared by the marker board client and the development backend.

use serde::{Deserialize, Serialize};

pub mod detail;
pub mod place;

pub use detail::{
    format_hhmm, truncate_chars, DetailSummary, OpeningHours, Period, PlaceDetail, Review,
    ReviewSummary, TimePoint, ADDRESS_PREFIX_CHARS,
};
pub use place::{LatLng, Place, PlaceError};

/// Board JSON rendered by the server for one search code.
///
/// Places are kept as raw JSON values so that a single malformed entry can be
/// skipped without failing the whole payload.
///
/// Older views send the list as `places`, newer ones as `shops`; a payload
/// carrying both keys gets the `shops` entries followed by the `places` ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBoardPayload")]
pub struct BoardPayload {
    pub center: serde_json::Value,
    pub places: Vec<serde_json::Value>,
    /// Map style identifier configured on the map provider side
    #[serde(rename = "mapId", skip_serializing_if = "Option::is_none")]
    pub map_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

#[derive(Deserialize)]
struct RawBoardPayload {
    #[serde(default)]
    center: serde_json::Value,
    #[serde(default)]
    shops: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    places: Option<Vec<serde_json::Value>>,
    #[serde(default, rename = "mapId")]
    map_id: Option<String>,
    #[serde(default)]
    zoom: Option<f64>,
}

impl From<RawBoardPayload> for BoardPayload {
    fn from(raw: RawBoardPayload) -> Self {
        Self {
            center: raw.center,
            places: merge_lists(raw.shops, raw.places),
            map_id: raw.map_id,
            zoom: raw.zoom,
        }
    }
}

fn merge_lists<T>(shops: Option<Vec<T>>, places: Option<Vec<T>>) -> Vec<T> {
    match (shops, places) {
        (Some(mut shops), Some(places)) => {
            tracing::warn!("Payload has both shops and places; using both");
            shops.extend(places);
            shops
        }
        (Some(list), None) | (None, Some(list)) => list,
        (None, None) => Vec::new(),
    }
}

impl BoardPayload {
    /// Parse a board from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Body of the detail endpoint on success
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: PlaceDetail,
}

/// Curated places submitted when leaving curate mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSubmitRequest")]
pub struct SubmitRequest {
    pub shops: Vec<Place>,
}

#[derive(Deserialize)]
struct RawSubmitRequest {
    shops: Option<Vec<Place>>,
    places: Option<Vec<Place>>,
}

impl TryFrom<RawSubmitRequest> for SubmitRequest {
    type Error = &'static str;

    fn try_from(raw: RawSubmitRequest) -> Result<Self, Self::Error> {
        if raw.shops.is_none() && raw.places.is_none() {
            return Err("missing field `shops`");
        }
        Ok(Self {
            shops: merge_lists(raw.shops, raw.places),
        })
    }
}

/// Reply of the submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }

    /// The backend answers "OK", older handlers "ok"
    pub fn is_ok(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("ok")
    }
}

/// Error body returned by every endpoint on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_payload_places_key() {
        let board: BoardPayload = serde_json::from_value(json!({
            "center": {"lat": 35.68, "lng": 139.76},
            "places": [{"location": {"lat": 35.0, "lng": 139.0}}]
        }))
        .unwrap();
        assert_eq!(board.places.len(), 1);
        assert!(board.map_id.is_none());
    }

    #[test]
    fn test_board_payload_shops_alias() {
        let board: BoardPayload = serde_json::from_value(json!({
            "center": {"lat": "35.68", "lng": "139.76"},
            "shops": [{"geometry": {"location": {"lat": "35.0", "lng": "139.0"}}}, "junk"],
            "mapId": "abc123"
        }))
        .unwrap();
        assert_eq!(board.places.len(), 2);
        assert_eq!(board.map_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_board_payload_both_keys_merged() {
        let board = BoardPayload::from_json(
            r#"{"center": {"lat": 35.0, "lng": 139.0},
                "shops": [{"location": {"lat": 35.0, "lng": 139.0}}],
                "places": [{"location": {"lat": 35.1, "lng": 139.1}}, "junk"]}"#,
        )
        .unwrap();
        assert_eq!(board.places.len(), 3);
        assert_eq!(board.places[0]["location"]["lat"], 35.0);
        assert_eq!(board.places[2], "junk");
    }

    #[test]
    fn test_board_payload_serializes_places_key() {
        let board = BoardPayload::from_json(r#"{"shops": [1]}"#).unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["places"], json!([1]));
        assert!(value.get("shops").is_none());
        assert_eq!(BoardPayload::from_json(&value.to_string()).unwrap(), board);
    }

    #[test]
    fn test_board_payload_missing_center_is_null() {
        let board = BoardPayload::from_json(r#"{"places": []}"#).unwrap();
        assert!(board.center.is_null());
    }

    #[test]
    fn test_submit_request_uses_shops_key() {
        let req = SubmitRequest {
            shops: vec![Place::new(LatLng::new(35.0, 139.0).unwrap(), Some("A".into()), None, None)],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("shops").is_some());
        assert!(value.get("places").is_none());
    }

    #[test]
    fn test_submit_request_accepts_places_alias() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "places": [{"location": {"lat": 1.0, "lng": 2.0}, "name": "x"}]
        }))
        .unwrap();
        assert_eq!(req.shops.len(), 1);
    }

    #[test]
    fn test_submit_request_both_keys_merged() {
        let req: SubmitRequest = serde_json::from_value(json!({
            "shops": [{"location": {"lat": 1.0, "lng": 2.0}, "name": "a"}],
            "places": [{"location": {"lat": 3.0, "lng": 4.0}, "name": "b"}]
        }))
        .unwrap();
        let names: Vec<&str> = req.shops.iter().map(|p| p.display_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_submit_request_requires_a_list() {
        assert!(serde_json::from_value::<SubmitRequest>(json!({})).is_err());
    }

    #[test]
    fn test_submit_response_ok_case_insensitive() {
        assert!(SubmitResponse { status: "OK".into() }.is_ok());
        assert!(SubmitResponse { status: "ok".into() }.is_ok());
        assert!(!SubmitResponse { status: "error".into() }.is_ok());
    }
}
