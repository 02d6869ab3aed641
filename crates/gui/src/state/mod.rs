pub mod board;
pub mod effect;
pub mod marker;
pub mod overlay;
pub mod selection;
pub mod settings;

use shared::BoardPayload;

pub use board::{BoardError, BoardOptions, CurateStyle, MarkerBoard, Mode, Notice};
pub use effect::{BoardEffect, BoardEvent, DetailRequest};
pub use marker::{Marker, MarkerId, MarkerStyle};
pub use overlay::{DetailPanel, DetailState, InfoOverlay, OverlayKind};
pub use settings::AppSettings;

/// Panel visibility flags
pub struct PanelVisibility {
    pub place_list: bool,
    pub detail: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            place_list: true,
            detail: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    /// The loaded board, if any load succeeded
    pub board: Option<MarkerBoard>,
    pub settings: AppSettings,
    pub panels: PanelVisibility,
    /// Show settings window
    pub show_settings_window: bool,
    /// Why the last load failed when there is no board to show it on
    pub load_error: Option<String>,
    /// A board request is in flight
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::load())
    }
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            board: None,
            settings,
            panels: PanelVisibility::default(),
            show_settings_window: false,
            load_error: None,
            loading: false,
        }
    }

    /// Start a user-initiated load of `location`
    pub fn request_load(&mut self, location: &str) -> BoardEffect {
        self.loading = true;
        BoardEffect::Navigate {
            origin: None,
            location: location.to_string(),
        }
    }

    /// Replace the board with one built from `payload`.
    ///
    /// On an invalid center the previous board (if any) is kept and the
    /// failure is reported on it.
    pub fn load_payload(&mut self, payload: &BoardPayload, initial_mode: Mode) -> bool {
        let options = self.settings.board_options(initial_mode);
        match MarkerBoard::from_payload(payload, options) {
            Ok(board) => {
                self.board = Some(board);
                self.load_error = None;
                true
            }
            Err(e) => {
                tracing::error!("Board load failed: {e}");
                self.report_load_failure(e.to_string());
                false
            }
        }
    }

    fn report_load_failure(&mut self, reason: String) {
        match self.board.as_mut() {
            Some(board) => board.set_notice(Notice::LoadFailed(reason)),
            None => self.load_error = Some(reason),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.board.as_ref().is_some_and(|b| b.generation() == generation)
    }

    /// Route a completion to the board it belongs to; returns follow-up effects.
    pub fn apply_event(&mut self, event: BoardEvent) -> Vec<BoardEffect> {
        match event {
            BoardEvent::DetailLoaded { request, result } => {
                match self.board.as_mut() {
                    Some(board) if board.generation() == request.generation => {
                        board.detail_loaded(&request, result);
                    }
                    _ => tracing::debug!("Dropping stale detail for {}", request.place_id),
                }
                Vec::new()
            }
            BoardEvent::Submitted { generation, result } => {
                if !self.is_current(generation) {
                    tracing::debug!("Dropping submission result for board {generation}");
                    return Vec::new();
                }
                let effects = match self.board.as_mut() {
                    Some(board) => board.submit_finished(result),
                    None => Vec::new(),
                };
                if let Some(BoardEffect::Navigate { .. }) = effects.first() {
                    self.loading = true;
                }
                effects
            }
            BoardEvent::Navigated {
                origin,
                location,
                result,
            } => {
                if let Some(origin) = origin {
                    if !self.is_current(origin) {
                        tracing::debug!("Dropping navigation to {location} from board {origin}");
                        return Vec::new();
                    }
                }
                self.loading = false;
                match result {
                    Ok(payload) => {
                        // after a submission the next board opens in browse mode
                        let mode = match origin {
                            Some(_) => Mode::Browse,
                            None => self.settings.initial_mode(),
                        };
                        if self.load_payload(&payload, mode) {
                            tracing::info!("Loaded {location}");
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to load {location}: {e}");
                        self.report_load_failure(e);
                    }
                }
                Vec::new()
            }
        }
    }

    /// Mirror the board's mode into `board.is_editing`; true when the
    /// settings changed and should be saved.
    pub fn sync_persisted_mode(&mut self) -> bool {
        if !self.settings.board.persist_mode {
            return false;
        }
        let Some(board) = &self.board else {
            return false;
        };
        let editing = board.mode().is_curate();
        if self.settings.board.is_editing == editing {
            return false;
        }
        self.settings.board.is_editing = editing;
        true
    }
}
