//! Network seam between the board and its server.

mod error;
mod http;

use std::future::Future;

use shared::{BoardPayload, PlaceDetail, SubmitRequest, SubmitResponse};

pub use error::BackendError;
pub use http::{cookie_value, HttpBackend, CSRF_COOKIE, CSRF_HEADER};

/// The three requests a board makes.
///
/// Locations are paths relative to the backend root (e.g. `search/9`).
pub trait Backend: Send + Sync + 'static {
    /// Board JSON for a location
    fn fetch_board(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<BoardPayload, BackendError>> + Send;

    /// Detail record for one place
    fn fetch_detail(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<PlaceDetail, BackendError>> + Send;

    /// Submit the curated places
    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = Result<SubmitResponse, BackendError>> + Send;
}
