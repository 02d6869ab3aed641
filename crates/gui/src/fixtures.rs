//! Factory functions for creating test data.
//!
//! Provides board/place JSON builders in both server shapes and a scripted
//! in-memory `Backend` used by the harness and the tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};
use shared::{BoardPayload, PlaceDetail, Review, SubmitRequest, SubmitResponse};

use crate::backend::{Backend, BackendError};

// ── JSON factories ──────────────────────────────────────────────

/// Default map center (Tokyo Station)
pub const CENTER: (f64, f64) = (35.681236, 139.767125);

/// A place in the canonical shape.
pub fn place_json(name: &str, lat: f64, lng: f64, place_id: Option<&str>) -> Value {
    let mut place = json!({
        "location": { "lat": lat, "lng": lng },
        "name": name,
    });
    if let Some(id) = place_id {
        place["place_id"] = json!(id);
    }
    place
}

/// A place the way the search view renders it: nested geometry, string coordinates.
pub fn shop_json(name: &str, lat: f64, lng: f64, place_id: &str) -> Value {
    json!({
        "geometry": { "location": { "lat": lat.to_string(), "lng": lng.to_string() } },
        "radius": 1500,
        "shop_name": name,
        "place_id": place_id,
    })
}

/// Board JSON around `CENTER`.
pub fn board_json(places: Vec<Value>) -> Value {
    json!({
        "center": { "lat": CENTER.0, "lng": CENTER.1 },
        "places": places,
    })
}

pub fn board_payload(places: Vec<Value>) -> BoardPayload {
    BoardPayload {
        center: json!({ "lat": CENTER.0, "lng": CENTER.1 }),
        places,
        ..Default::default()
    }
}

/// Three places near `CENTER`, the last one without a place id.
pub fn sample_board() -> Value {
    board_json(vec![
        place_json("Cafe", 35.6812, 139.7671, Some("place-cafe")),
        place_json("Ramen", 35.6830, 139.7700, Some("place-ramen")),
        place_json("Park", 35.6790, 139.7640, None),
    ])
}

pub fn sample_detail() -> PlaceDetail {
    PlaceDetail {
        name: Some("Sample Place".to_string()),
        formatted_address: Some("1-9-1 Marunouchi, Chiyoda City, Tokyo 100-0005, Japan".to_string()),
        formatted_phone_number: Some("03-1234-5678".to_string()),
        opening_hours: serde_json::from_value(json!({
            "periods": [{ "open": { "day": 1, "time": "1100" }, "close": { "day": 1, "time": "2200" } }]
        }))
        .ok(),
        price_level: Some(2),
        rating: Some(4.2),
        types: vec!["cafe".to_string(), "food".to_string()],
        website: Some("https://example.com".to_string()),
        reviews: vec![Review {
            author_name: "Taro".to_string(),
            rating: Some(5.0),
            text: "Great coffee".to_string(),
        }],
    }
}

// ── Scripted backend ────────────────────────────────────────────

#[derive(Default)]
struct Script {
    boards: HashMap<String, Value>,
    details: HashMap<String, PlaceDetail>,
    submit_reply: Option<Result<SubmitResponse, (u16, String)>>,
    board_calls: Vec<String>,
    detail_calls: Vec<String>,
    submissions: Vec<SubmitRequest>,
}

/// In-memory backend answering from a script and recording every call.
///
/// Unknown boards and details answer 404; submissions answer `{"status": "OK"}`
/// unless told otherwise.
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<Script>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_board(self, location: &str, board: &Value) -> Self {
        self.script().boards.insert(location.to_string(), board.clone());
        self
    }

    pub fn with_detail(self, place_id: &str, detail: PlaceDetail) -> Self {
        self.script().details.insert(place_id.to_string(), detail);
        self
    }

    /// Reply to submissions with this `status` field
    pub fn submit_status(self, status: &str) -> Self {
        self.script().submit_reply = Some(Ok(SubmitResponse {
            status: status.to_string(),
        }));
        self
    }

    /// Reply to submissions with an HTTP error
    pub fn fail_submit(self, status: u16, message: &str) -> Self {
        self.script().submit_reply = Some(Err((status, message.to_string())));
        self
    }

    pub fn board_calls(&self) -> Vec<String> {
        self.script().board_calls.clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.script().detail_calls.clone()
    }

    pub fn submissions(&self) -> Vec<SubmitRequest> {
        self.script().submissions.clone()
    }
}

impl Backend for ScriptedBackend {
    async fn fetch_board(&self, location: &str) -> Result<BoardPayload, BackendError> {
        let board = {
            let mut script = self.script();
            script.board_calls.push(location.to_string());
            script.boards.get(location).cloned()
        };
        match board {
            Some(board) => Ok(serde_json::from_value(board)?),
            None => Err(BackendError::Api {
                status: 404,
                message: format!("no board at {location}"),
            }),
        }
    }

    async fn fetch_detail(&self, place_id: &str) -> Result<PlaceDetail, BackendError> {
        let mut script = self.script();
        script.detail_calls.push(place_id.to_string());
        script
            .details
            .get(place_id)
            .cloned()
            .ok_or_else(|| BackendError::Api {
                status: 404,
                message: format!("no detail for place {place_id}"),
            })
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, BackendError> {
        let mut script = self.script();
        script.submissions.push(request.clone());
        match &script.submit_reply {
            None => Ok(SubmitResponse::ok()),
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err((status, message))) => Err(BackendError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
