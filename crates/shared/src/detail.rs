//! Place detail record returned by the detail endpoint, and the condensed
//! summary shown in the overlay and the side panel.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of the address shown before truncation
pub const ADDRESS_PREFIX_CHARS: usize = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<TimePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<TimePoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: String,
}

/// Detail fields as delivered by the places provider. Every field is optional
/// because the backend only requests a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub author: String,
    pub rating: Option<f64>,
    pub text: String,
}

/// The fields the board displays for a place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSummary {
    pub name: Option<String>,
    /// Address cut to `ADDRESS_PREFIX_CHARS`
    pub address: Option<String>,
    pub phone: Option<String>,
    /// First opening window, e.g. "11:00–22:00"
    pub hours: Option<String>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub categories: Vec<String>,
    pub website: Option<String>,
    pub review: Option<ReviewSummary>,
}

impl DetailSummary {
    pub fn from_detail(detail: &PlaceDetail) -> Self {
        let hours = detail
            .opening_hours
            .as_ref()
            .and_then(|h| h.periods.first())
            .and_then(first_window);

        let review = detail.reviews.first().map(|r| ReviewSummary {
            author: r.author_name.clone(),
            rating: r.rating,
            text: r.text.clone(),
        });

        Self {
            name: detail.name.clone(),
            address: detail
                .formatted_address
                .as_deref()
                .map(|a| truncate_chars(a, ADDRESS_PREFIX_CHARS)),
            phone: detail.formatted_phone_number.clone(),
            hours,
            price_level: detail.price_level,
            rating: detail.rating,
            categories: detail.types.clone(),
            website: detail.website.clone(),
            review,
        }
    }
}

fn first_window(period: &Period) -> Option<String> {
    let open = period.open.as_ref()?.time.as_deref()?;
    let close = period.close.as_ref().and_then(|c| c.time.as_deref());
    Some(match close {
        Some(close) => format!("{}–{}", format_hhmm(open), format_hhmm(close)),
        None => format!("{}–", format_hhmm(open)),
    })
}

/// "1100" → "11:00". Anything that is not four ASCII digits is returned as is.
pub fn format_hhmm(time: &str) -> String {
    if time.len() == 4 && time.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}:{}", &time[..2], &time[2..])
    } else {
        time.to_string()
    }
}

/// Keep the first `max` characters, marking the cut with an ellipsis
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_detail() -> PlaceDetail {
        serde_json::from_value(json!({
            "name": "Sushi Dai",
            "formatted_address": "5 Chome-2-1 Tsukiji, Chuo City, Tokyo 104-0045, Japan",
            "formatted_phone_number": "03-3547-6797",
            "opening_hours": {"periods": [
                {"open": {"day": 1, "time": "0530"}, "close": {"day": 1, "time": "1400"}},
                {"open": {"day": 2, "time": "0600"}, "close": {"day": 2, "time": "1300"}}
            ]},
            "price_level": 3,
            "rating": 4.4,
            "types": ["restaurant", "food"],
            "website": "https://example.com/sushi",
            "reviews": [
                {"author_name": "Aki", "rating": 5, "text": "Fresh."},
                {"author_name": "Ben", "rating": 3, "text": "Long queue."}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_fields() {
        let s = DetailSummary::from_detail(&sample_detail());
        assert_eq!(s.name.as_deref(), Some("Sushi Dai"));
        assert_eq!(s.phone.as_deref(), Some("03-3547-6797"));
        assert_eq!(s.hours.as_deref(), Some("05:30–14:00"));
        assert_eq!(s.price_level, Some(3));
        assert_eq!(s.rating, Some(4.4));
        assert_eq!(s.categories, vec!["restaurant", "food"]);
        let review = s.review.unwrap();
        assert_eq!(review.author, "Aki");
        assert_eq!(review.text, "Fresh.");
    }

    #[test]
    fn test_summary_address_truncated() {
        let s = DetailSummary::from_detail(&sample_detail());
        let address = s.address.unwrap();
        assert_eq!(address.chars().count(), ADDRESS_PREFIX_CHARS + 1);
        assert!(address.starts_with("5 Chome-2-1 Tsukiji"));
        assert!(address.ends_with('…'));
    }

    #[test]
    fn test_summary_empty_detail() {
        let s = DetailSummary::from_detail(&PlaceDetail::default());
        assert_eq!(s, DetailSummary::default());
    }

    #[test]
    fn test_open_ended_window() {
        let detail = PlaceDetail {
            opening_hours: Some(OpeningHours {
                periods: vec![Period {
                    open: Some(TimePoint { day: Some(0), time: Some("0000".into()) }),
                    close: None,
                }],
            }),
            ..Default::default()
        };
        assert_eq!(DetailSummary::from_detail(&detail).hours.as_deref(), Some("00:00–"));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("東京都中央区築地", 3), "東京都…");
        assert_eq!(truncate_chars("short", 30), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm("1100"), "11:00");
        assert_eq!(format_hhmm("9:00"), "9:00");
        assert_eq!(format_hhmm("11a0"), "11a0");
    }
}
