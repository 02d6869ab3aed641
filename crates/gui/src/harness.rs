//! Headless test harness: an `AppState` plus a driver, stepped by hand.
//!
//! Gestures go through the same `MarkerBoard` methods the UI calls; their
//! effects run on the current tokio runtime against any `Backend`.

use std::sync::Arc;

use shared::BoardPayload;
use tokio::runtime::Handle;

use crate::backend::Backend;
use crate::driver::BoardDriver;
use crate::state::{AppSettings, AppState, BoardEffect, BoardEvent, MarkerBoard, MarkerId};

pub struct TestHarness<B: Backend> {
    pub state: AppState,
    driver: BoardDriver<B>,
    /// Effects dispatched whose event has not been received yet
    pending: usize,
}

impl<B: Backend> TestHarness<B> {
    /// Create a harness with default settings. Must be called inside a tokio runtime.
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_settings(backend, AppSettings::default())
    }

    pub fn with_settings(backend: Arc<B>, settings: AppSettings) -> Self {
        Self {
            state: AppState::new(settings),
            driver: BoardDriver::new(Handle::current(), backend),
            pending: 0,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        self.driver.backend()
    }

    pub fn board(&self) -> Option<&MarkerBoard> {
        self.state.board.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    // ── Loading ───────────────────────────────────────────────

    /// Load a board from JSON text, as `--board <file>` does
    pub fn load_json(&mut self, json: &str) -> Result<(), String> {
        let payload = BoardPayload::from_json(json).map_err(|e| e.to_string())?;
        let mode = self.state.settings.initial_mode();
        if self.state.load_payload(&payload, mode) {
            Ok(())
        } else {
            Err(self.state.load_error.clone().unwrap_or_default())
        }
    }

    /// Fetch a board from the backend and wait for it
    pub async fn load_location(&mut self, location: &str) {
        let effect = self.state.request_load(location);
        self.dispatch(vec![effect]);
        self.settle().await;
    }

    // ── Gestures ──────────────────────────────────────────────

    pub fn click(&mut self, id: MarkerId) {
        let effects = match self.state.board.as_mut() {
            Some(board) => board.click_marker(id),
            None => Vec::new(),
        };
        self.dispatch(effects);
    }

    pub fn hover(&mut self, id: Option<MarkerId>) {
        if let Some(board) = self.state.board.as_mut() {
            board.hover_marker(id);
        }
    }

    pub fn click_empty(&mut self) {
        if let Some(board) = self.state.board.as_mut() {
            board.click_empty();
        }
    }

    pub fn toggle_mode(&mut self) {
        if let Some(board) = self.state.board.as_mut() {
            board.toggle_mode();
        }
        self.state.sync_persisted_mode();
    }

    /// Answer the exit confirmation
    pub fn confirm_exit(&mut self, confirmed: bool) {
        let effects = match self.state.board.as_mut() {
            Some(board) => board.resolve_exit(confirmed),
            None => Vec::new(),
        };
        self.dispatch(effects);
    }

    // ── Event loop ────────────────────────────────────────────

    fn dispatch(&mut self, effects: Vec<BoardEffect>) {
        self.pending += effects.len();
        self.driver.dispatch(effects);
    }

    /// Receive one completion without applying it
    pub async fn next_event(&mut self) -> Option<BoardEvent> {
        if self.pending == 0 {
            return None;
        }
        let event = self.driver.next_event().await?;
        self.pending -= 1;
        Some(event)
    }

    /// Apply a completion and run whatever it triggers
    pub fn apply(&mut self, event: BoardEvent) {
        let effects = self.state.apply_event(event);
        self.state.sync_persisted_mode();
        self.dispatch(effects);
    }

    /// Run until no request is in flight
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// First marker whose place has this display name
    pub fn marker_named(&self, name: &str) -> Option<MarkerId> {
        let board = self.board()?;
        board
            .markers()
            .iter()
            .find(|m| board.place(m.id).is_some_and(|p| p.display_name() == name))
            .map(|m| m.id)
    }
}
