//! Marker board: places, markers, mode, selection and the single info overlay.
//!
//! Gesture handlers read the current mode at call time and return the effects
//! (network work) the caller must run; completions come back through
//! `detail_loaded` and `submit_finished`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use shared::{
    BoardPayload, DetailSummary, LatLng, Place, PlaceDetail, PlaceError, SubmitRequest,
    SubmitResponse,
};
use thiserror::Error;

use super::effect::{BoardEffect, DetailRequest};
use super::marker::{Marker, MarkerId, MarkerStyle};
use super::overlay::{DetailPanel, DetailState, InfoOverlay, OverlayKind};
use super::selection::SelectionState;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Clicks show place info
    #[default]
    Browse,
    /// Clicks select places for submission
    Curate,
}

impl Mode {
    pub fn is_curate(self) -> bool {
        self == Mode::Curate
    }
}

/// How curate-mode clicks build the submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurateStyle {
    /// Click toggles membership; markers stay on the map
    #[default]
    Toggle,
    /// Click removes the marker from the map and keeps its place
    Collect,
}

/// Last user-facing status of the board
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    EnteredCurate,
    ExitDeclined,
    Submitting,
    Submitted(String),
    SubmitFailed(String),
    LoadFailed(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SubmitFailed(_) | Notice::LoadFailed(_))
    }
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid map center: {0}")]
    InvalidCenter(#[source] PlaceError),
}

/// Construction-time behaviour, usually derived from settings
#[derive(Debug, Clone, PartialEq)]
pub struct BoardOptions {
    pub initial_mode: Mode,
    pub hover_preview: bool,
    pub curate_style: CurateStyle,
    /// Where to go after a successful submission
    pub results_location: String,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Browse,
            hover_preview: true,
            curate_style: CurateStyle::Toggle,
            results_location: "search/2".to_string(),
        }
    }
}

pub struct MarkerBoard {
    generation: u64,
    center: LatLng,
    zoom: Option<f64>,
    map_id: Option<String>,
    places: Vec<Place>,
    markers: Vec<Marker>,
    skipped: usize,
    mode: Mode,
    selection: SelectionState,
    overlay: Option<InfoOverlay>,
    panel: DetailPanel,
    exit_prompt: bool,
    submitting: bool,
    next_seq: u64,
    notice: Option<Notice>,
    options: BoardOptions,
}

impl MarkerBoard {
    /// Build a board from normalized places. One marker per place.
    pub fn new(center: LatLng, places: Vec<Place>, options: BoardOptions) -> Self {
        let markers = places
            .iter()
            .enumerate()
            .map(|(i, p)| Marker {
                id: MarkerId(i),
                position: p.location,
                visible: true,
            })
            .collect();

        let mode = options.initial_mode;
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            center,
            zoom: None,
            map_id: None,
            places,
            markers,
            skipped: 0,
            mode,
            selection: SelectionState::default(),
            overlay: None,
            panel: DetailPanel::default(),
            exit_prompt: false,
            submitting: false,
            next_seq: 0,
            notice: mode.is_curate().then_some(Notice::EnteredCurate),
            options,
        }
    }

    /// Normalize server JSON and build a board.
    ///
    /// A malformed center is fatal; malformed places are skipped and logged.
    pub fn from_payload(payload: &BoardPayload, options: BoardOptions) -> Result<Self, BoardError> {
        let center = LatLng::from_json(&payload.center).map_err(BoardError::InvalidCenter)?;

        let mut places = Vec::with_capacity(payload.places.len());
        let mut skipped = 0;
        for (i, raw) in payload.places.iter().enumerate() {
            match Place::from_json(raw) {
                Ok(place) => places.push(place),
                Err(e) => {
                    tracing::warn!("Skipping place {i}: {e}");
                    skipped += 1;
                }
            }
        }

        match &payload.map_id {
            Some(map_id) => tracing::info!("Using map id {map_id}"),
            None => tracing::debug!("No map id provided, default style"),
        }

        let mut board = Self::new(center, places, options);
        board.zoom = payload.zoom;
        board.map_id = payload.map_id.clone();
        board.skipped = skipped;
        tracing::info!(
            "Board {} loaded: {} markers, {} skipped",
            board.generation,
            board.markers.len(),
            skipped
        );
        Ok(board)
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    pub fn map_id(&self) -> Option<&str> {
        self.map_id.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.visible)
    }

    pub fn place(&self, id: MarkerId) -> Option<&Place> {
        self.places.get(id.0)
    }

    /// Number of input places rejected at load
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_selected(&self, id: MarkerId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn overlay(&self) -> Option<&InfoOverlay> {
        self.overlay.as_ref()
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    pub fn exit_prompt_open(&self) -> bool {
        self.exit_prompt
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn marker_style(&self, id: MarkerId) -> MarkerStyle {
        if self.selection.is_selected(id) {
            MarkerStyle::Selected
        } else if self.overlay.as_ref().is_some_and(|o| o.marker == id) {
            MarkerStyle::Active
        } else {
            MarkerStyle::Normal
        }
    }

    // ── Mode ──────────────────────────────────────────────────

    /// The single external trigger: enter curate, or ask to leave it.
    pub fn toggle_mode(&mut self) {
        if self.submitting {
            tracing::debug!("Mode toggle ignored while submitting");
            return;
        }
        match self.mode {
            Mode::Browse => {
                self.mode = Mode::Curate;
                self.overlay = None;
                self.notice = Some(Notice::EnteredCurate);
                tracing::info!("Entered curate mode");
            }
            Mode::Curate => {
                self.exit_prompt = true;
            }
        }
    }

    /// Answer the exit confirmation. Declining keeps curate mode untouched;
    /// confirming submits the selection.
    pub fn resolve_exit(&mut self, confirmed: bool) -> Vec<BoardEffect> {
        if !self.exit_prompt {
            return Vec::new();
        }
        self.exit_prompt = false;

        if !confirmed {
            self.mode = Mode::Curate;
            self.notice = Some(Notice::ExitDeclined);
            return Vec::new();
        }

        let request = self.submission();
        tracing::info!("Submitting {} places", request.shops.len());
        self.submitting = true;
        self.notice = Some(Notice::Submitting);
        vec![BoardEffect::Submit {
            generation: self.generation,
            request,
        }]
    }

    /// The curated places in selection order
    pub fn submission(&self) -> SubmitRequest {
        SubmitRequest {
            shops: self
                .selection
                .all()
                .iter()
                .filter_map(|id| self.place(*id).cloned())
                .collect(),
        }
    }

    /// Handle the submission reply. Success clears the selection, returns to
    /// browse mode and navigates; any failure leaves mode and selection as is.
    pub fn submit_finished(&mut self, result: Result<SubmitResponse, String>) -> Vec<BoardEffect> {
        self.submitting = false;
        match result {
            Ok(response) if response.is_ok() => {
                self.selection.clear();
                for marker in &mut self.markers {
                    marker.visible = true;
                }
                self.mode = Mode::Browse;
                self.notice = Some(Notice::Submitted(response.status));
                vec![BoardEffect::Navigate {
                    origin: Some(self.generation),
                    location: self.options.results_location.clone(),
                }]
            }
            Ok(response) => {
                tracing::warn!("Submission rejected with status {:?}", response.status);
                self.notice = Some(Notice::SubmitFailed(format!(
                    "unexpected status: {}",
                    response.status
                )));
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Submission failed: {e}");
                self.notice = Some(Notice::SubmitFailed(e));
                Vec::new()
            }
        }
    }

    // ── Gestures ──────────────────────────────────────────────

    /// Marker click, dispatched on the current mode
    pub fn click_marker(&mut self, id: MarkerId) -> Vec<BoardEffect> {
        let Some(marker) = self.markers.get(id.0) else {
            tracing::warn!("Click on unknown marker {id}");
            return Vec::new();
        };
        if !marker.visible {
            return Vec::new();
        }

        match self.mode {
            Mode::Browse => self.open_detail(id),
            Mode::Curate => {
                if self.submitting {
                    tracing::debug!("Selection change ignored while submitting");
                } else {
                    self.curate(id);
                }
                Vec::new()
            }
        }
    }

    fn open_detail(&mut self, id: MarkerId) -> Vec<BoardEffect> {
        let Some(place) = self.places.get(id.0) else {
            return Vec::new();
        };
        let title = place.display_name().to_string();

        let Some(place_id) = place.place_id.clone() else {
            self.overlay = Some(InfoOverlay {
                marker: id,
                kind: OverlayKind::Click,
                detail: DetailState::NotRequested,
            });
            return Vec::new();
        };

        self.overlay = Some(InfoOverlay {
            marker: id,
            kind: OverlayKind::Click,
            detail: DetailState::Loading,
        });
        self.panel.show(id, &title, DetailState::Loading);

        self.next_seq += 1;
        vec![BoardEffect::FetchDetail(DetailRequest {
            generation: self.generation,
            seq: self.next_seq,
            marker: id,
            place_id,
        })]
    }

    fn curate(&mut self, id: MarkerId) {
        match self.options.curate_style {
            CurateStyle::Toggle => {
                let selected = self.selection.toggle(id);
                tracing::debug!("Marker {id} selected={selected}");
            }
            CurateStyle::Collect => {
                if self.selection.add(id) {
                    if let Some(marker) = self.markers.get_mut(id.0) {
                        marker.visible = false;
                    }
                    tracing::debug!("Marker {id} collected");
                }
            }
        }
    }

    /// Pointer entered (`Some`) or left (`None`) a marker
    pub fn hover_marker(&mut self, id: Option<MarkerId>) {
        if !self.options.hover_preview || self.mode.is_curate() {
            return;
        }
        match id {
            Some(id) => {
                if !self.markers.get(id.0).is_some_and(|m| m.visible) {
                    return;
                }
                match &self.overlay {
                    Some(o) if o.kind == OverlayKind::Click => {}
                    Some(o) if o.marker == id => {}
                    _ => {
                        self.overlay = Some(InfoOverlay {
                            marker: id,
                            kind: OverlayKind::Hover,
                            detail: DetailState::NotRequested,
                        });
                    }
                }
            }
            None => {
                if self.overlay.as_ref().is_some_and(|o| o.kind == OverlayKind::Hover) {
                    self.overlay = None;
                }
            }
        }
    }

    /// Click on the map away from any marker
    pub fn click_empty(&mut self) {
        self.close_overlay();
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Apply a detail response. The side panel shows whatever arrives last;
    /// the overlay only if it is still open on the same marker.
    pub fn detail_loaded(&mut self, request: &DetailRequest, result: Result<PlaceDetail, String>) {
        if request.generation != self.generation {
            tracing::debug!("Dropping detail for board {}", request.generation);
            return;
        }

        let state = match result {
            Ok(detail) => DetailState::Loaded(DetailSummary::from_detail(&detail)),
            Err(e) => {
                tracing::warn!("Detail fetch for {} failed: {e}", request.place_id);
                DetailState::Failed(e)
            }
        };

        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.marker == request.marker && overlay.kind == OverlayKind::Click {
                overlay.detail = state.clone();
            }
        }

        let title = self
            .place(request.marker)
            .map(|p| p.display_name().to_string())
            .unwrap_or_default();
        self.panel.show(request.marker, &title, state);
    }
}
