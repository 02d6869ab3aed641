use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::csrf;
use crate::store::PIN_SELECT;
use crate::AppState;
use shared::{DetailResponse, ErrorBody, SubmitRequest, SubmitResponse};

/// Error reply with a JSON `{ message }` body
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

fn check_csrf(headers: &HeaderMap) -> Result<(), ApiError> {
    csrf::verify(headers).map_err(|reason| {
        tracing::warn!("Rejected request: {reason}");
        ApiError::new(StatusCode::FORBIDDEN, format!("CSRF verification failed: {reason}"))
    })
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Board JSON for a search code; hands out a CSRF cookie on first visit
pub async fn board(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Response {
    let view = state.store.read().await.board(&code);
    tracing::debug!("Board {code}: {} shops", view.shops.len());

    let mut response = Json(view).into_response();
    if csrf::cookie_token(&headers).is_none() {
        if let Some(cookie) = csrf::set_cookie(&csrf::issue()) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }
    response
}

/// Place detail lookup
pub async fn detail(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    let store = state.store.read().await;
    match store.detail(&place_id) {
        Some(detail) => Ok(Json(DetailResponse {
            detail: detail.clone(),
        })),
        None => {
            tracing::info!("No detail for {place_id}");
            Err(ApiError::new(
                StatusCode::NOT_FOUND,
                format!("no detail for place {place_id}"),
            ))
        }
    }
}

/// Place detail lookup via POST, CSRF-checked
pub async fn detail_checked(
    state: State<AppState>,
    place_id: Path<String>,
    headers: HeaderMap,
) -> Result<Json<DetailResponse>, ApiError> {
    check_csrf(&headers)?;
    detail(state, place_id).await
}

/// Store the curated selection (pin-select mode)
pub async fn submit(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    check_csrf(&headers)?;

    if code != PIN_SELECT {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("search code {code} does not accept submissions"),
        ));
    }

    let request: SubmitRequest = serde_json::from_slice(&body).map_err(|e| {
        ApiError::new(StatusCode::BAD_REQUEST, format!("invalid submission: {e}"))
    })?;

    tracing::info!("Stored {} pinned places", request.shops.len());
    state.store.write().await.replace(PIN_SELECT, request.shops);

    Ok(Json(SubmitResponse::ok()))
}
