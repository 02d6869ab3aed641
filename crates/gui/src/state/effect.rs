//! Requests the board hands to the driver, and the completions it gets back.

use shared::{BoardPayload, PlaceDetail, SubmitRequest, SubmitResponse};

use super::marker::MarkerId;

/// One detail fetch issued by a browse-mode click
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest {
    /// Board that issued the request
    pub generation: u64,
    /// Per-board request counter
    pub seq: u64,
    pub marker: MarkerId,
    pub place_id: String,
}

/// Work the board cannot do itself
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEffect {
    FetchDetail(DetailRequest),
    Submit {
        generation: u64,
        request: SubmitRequest,
    },
    /// Load another board. `origin` is the generation of the board that asked
    /// for it, `None` for a user-initiated load.
    Navigate {
        origin: Option<u64>,
        location: String,
    },
}

/// Completion of an effect; errors are already rendered to strings
#[derive(Debug, Clone)]
pub enum BoardEvent {
    DetailLoaded {
        request: DetailRequest,
        result: Result<PlaceDetail, String>,
    },
    Submitted {
        generation: u64,
        result: Result<SubmitResponse, String>,
    },
    Navigated {
        origin: Option<u64>,
        location: String,
        result: Result<BoardPayload, String>,
    },
}
