//! Info overlay and side panel contents (data only).
//!
//! Rendering lives in the binary crate (viewport/overlay.rs, ui/detail_panel.rs).

use shared::DetailSummary;

use super::marker::MarkerId;

/// What opened the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Marker click in browse mode; may carry fetched detail
    Click,
    /// Pointer hover; never fetches
    Hover,
}

/// Progress of a detail fetch as seen by the user
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    /// No place id, or a hover preview
    #[default]
    NotRequested,
    Loading,
    Loaded(DetailSummary),
    /// The reason is logged; the UI shows a generic failure text
    Failed(String),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn summary(&self) -> Option<&DetailSummary> {
        match self {
            DetailState::Loaded(summary) => Some(summary),
            _ => None,
        }
    }
}

/// The transient popup anchored to a marker
#[derive(Debug, Clone, PartialEq)]
pub struct InfoOverlay {
    pub marker: MarkerId,
    pub kind: OverlayKind,
    pub detail: DetailState,
}

/// Side panel describing the last place whose detail was requested
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPanel {
    pub marker: Option<MarkerId>,
    pub title: String,
    pub detail: DetailState,
}

impl DetailPanel {
    pub fn show(&mut self, marker: MarkerId, title: &str, detail: DetailState) {
        self.marker = Some(marker);
        self.title = title.to_string();
        self.detail = detail;
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_none()
    }
}
