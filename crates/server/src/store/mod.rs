//! In-memory place store seeded from JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{LatLng, OpeningHours, Period, Place, PlaceDetail, Review, TimePoint};

/// Category shown when no search code is given
pub const DEFAULT_CATEGORY: &str = "9";
/// Category holding the places picked in curate mode
pub const PIN_SELECT: &str = "2";
/// Search radius echoed in board JSON (meters)
const SEARCH_RADIUS: u32 = 1500;

/// Seed file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub center: LatLng,
    #[serde(default)]
    pub categories: HashMap<String, Vec<Place>>,
    #[serde(default)]
    pub details: HashMap<String, PlaceDetail>,
}

/// Coordinate pair rendered as strings, the way the site template emits it
#[derive(Debug, Clone, Serialize)]
pub struct PairView {
    pub lat: String,
    pub lng: String,
}

impl From<LatLng> for PairView {
    fn from(ll: LatLng) -> Self {
        Self {
            lat: ll.lat.to_string(),
            lng: ll.lng.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryView {
    pub location: PairView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopView {
    pub geometry: GeometryView,
    pub radius: u32,
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// Board JSON for one category
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub center: PairView,
    pub shops: Vec<ShopView>,
}

pub struct Store {
    center: LatLng,
    categories: HashMap<String, Vec<Place>>,
    details: HashMap<String, PlaceDetail>,
}

impl Store {
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            center: seed.center,
            categories: seed.categories,
            details: seed.details,
        }
    }

    /// Load a seed file
    pub fn load(path: &str) -> Result<Self, String> {
        let json = std::fs::read_to_string(path).map_err(|e| format!("read error: {e}"))?;
        let seed: Seed = serde_json::from_str(&json).map_err(|e| format!("JSON parse error: {e}"))?;
        Ok(Self::from_seed(seed))
    }

    /// Board JSON for a category; unknown categories render an empty board
    pub fn board(&self, code: &str) -> BoardView {
        let shops = self
            .categories
            .get(code)
            .map(|places| {
                places
                    .iter()
                    .map(|p| ShopView {
                        geometry: GeometryView {
                            location: p.location.into(),
                        },
                        radius: SEARCH_RADIUS,
                        shop_name: p.display_name().to_string(),
                        place_id: p.place_id.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        BoardView {
            center: self.center.into(),
            shops,
        }
    }

    /// Replace all places of a category
    pub fn replace(&mut self, code: &str, places: Vec<Place>) {
        self.categories.insert(code.to_string(), places);
    }

    pub fn places(&self, code: &str) -> &[Place] {
        self.categories.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn detail(&self, place_id: &str) -> Option<&PlaceDetail> {
        self.details.get(place_id)
    }

    /// A small board around Tokyo Station
    pub fn demo() -> Self {
        let place = |lat: f64, lng: f64, name: &str, id: &str, rating: f64| Place {
            location: LatLng { lat, lng },
            name: Some(name.to_string()),
            place_id: Some(id.to_string()),
            rating: Some(rating),
        };
        let hours = |open: &str, close: &str| OpeningHours {
            periods: vec![Period {
                open: Some(TimePoint { day: Some(1), time: Some(open.to_string()) }),
                close: Some(TimePoint { day: Some(1), time: Some(close.to_string()) }),
            }],
        };

        let places = vec![
            place(35.681236, 139.767125, "Tokyo Station", "demo-station", 4.3),
            place(35.678960, 139.766320, "Marunouchi Cafe", "demo-cafe", 4.1),
            place(35.683870, 139.771450, "Yaesu Ramen", "demo-ramen", 3.8),
            place(35.676480, 139.763010, "Yurakucho Izakaya", "demo-izakaya", 4.0),
        ];

        let mut details = HashMap::new();
        details.insert(
            "demo-cafe".to_string(),
            PlaceDetail {
                name: Some("Marunouchi Cafe".to_string()),
                formatted_address: Some(
                    "2 Chome-4-1 Marunouchi, Chiyoda City, Tokyo 100-6390, Japan".to_string(),
                ),
                formatted_phone_number: Some("03-0000-0001".to_string()),
                opening_hours: Some(hours("0800", "2100")),
                price_level: Some(2),
                rating: Some(4.1),
                types: vec!["cafe".to_string(), "food".to_string()],
                website: Some("https://example.com/cafe".to_string()),
                reviews: vec![Review {
                    author_name: "Hana".to_string(),
                    rating: Some(4.0),
                    text: "Quiet in the morning.".to_string(),
                }],
            },
        );
        details.insert(
            "demo-ramen".to_string(),
            PlaceDetail {
                name: Some("Yaesu Ramen".to_string()),
                formatted_address: Some("1 Chome-9-1 Marunouchi, Chiyoda City, Tokyo".to_string()),
                opening_hours: Some(hours("1100", "2300")),
                price_level: Some(1),
                rating: Some(3.8),
                types: vec!["restaurant".to_string()],
                ..Default::default()
            },
        );

        let mut categories = HashMap::new();
        categories.insert(DEFAULT_CATEGORY.to_string(), places);

        Self {
            center: LatLng { lat: 35.681236, lng: 139.767125 },
            categories,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_board_shape() {
        let store = Store::demo();
        let board = store.board(DEFAULT_CATEGORY);
        assert_eq!(board.shops.len(), 4);
        let json = serde_json::to_value(&board).unwrap();
        assert!(json["center"]["lat"].is_string());
        assert!(json["shops"][0]["geometry"]["location"]["lng"].is_string());
        assert_eq!(json["shops"][0]["shop_name"], "Tokyo Station");
        assert_eq!(json["shops"][0]["radius"], 1500);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(Store::demo().board("404").shops.is_empty());
    }

    #[test]
    fn test_replace_pin_select() {
        let mut store = Store::demo();
        let picked = store.places(DEFAULT_CATEGORY)[..2].to_vec();
        store.replace(PIN_SELECT, picked);
        assert_eq!(store.places(PIN_SELECT).len(), 2);
        assert_eq!(store.board(PIN_SELECT).shops[1].shop_name, "Marunouchi Cafe");
    }

    #[test]
    fn test_board_round_trips_through_normalization() {
        let store = Store::demo();
        let json = serde_json::to_string(&store.board(DEFAULT_CATEGORY)).unwrap();
        let payload = shared::BoardPayload::from_json(&json).unwrap();
        let places: Vec<Place> = payload
            .places
            .iter()
            .map(|v| Place::from_json(v).unwrap())
            .collect();
        assert_eq!(places[2].display_name(), "Yaesu Ramen");
        assert_eq!(places[2].location, store.places(DEFAULT_CATEGORY)[2].location);
    }

    #[test]
    fn test_seed_parse() {
        let seed: Seed = serde_json::from_str(
            r#"{"center": {"lat": 1.0, "lng": 2.0},
                "categories": {"9": [{"location": {"lat": 1.0, "lng": 2.0}, "name": "x"}]}}"#,
        )
        .unwrap();
        let store = Store::from_seed(seed);
        assert_eq!(store.places("9").len(), 1);
        assert!(store.detail("missing").is_none());
    }
}
