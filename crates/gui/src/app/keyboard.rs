//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, BoardEffect};
use crate::viewport::MapPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    map: &mut MapPanel,
) -> Vec<BoardEffect> {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return Vec::new();
    }

    let (toggle, reload, reset, escape) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::E) && !i.modifiers.command,
            i.key_pressed(egui::Key::F5),
            i.key_pressed(egui::Key::Home),
            i.key_pressed(egui::Key::Escape),
        )
    });

    let mut effects = Vec::new();

    if let Some(board) = state.board.as_mut() {
        // E: mode trigger; ignored while the exit dialog is up
        if toggle && !board.exit_prompt_open() {
            board.toggle_mode();
        }
        // Escape: close the info overlay (the exit dialog handles its own)
        if escape && !board.exit_prompt_open() {
            board.close_overlay();
        }
        if reset {
            map.reset_camera(board);
        }
    }

    if reload && !state.loading {
        let location = state.settings.connection.start_location.clone();
        effects.push(state.request_load(&location));
    }

    effects
}
