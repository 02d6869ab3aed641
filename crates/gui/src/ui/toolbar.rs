//! Toolbar: the mode trigger and selection summary

use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, BoardEffect, Mode};

/// Fill of the mode trigger while curating
const CURATE_FILL: egui::Color32 = egui::Color32::from_rgb(190, 90, 30);

pub fn show(ui: &mut Ui, state: &mut AppState) -> Vec<BoardEffect> {
    let mut effects = Vec::new();
    ui.horizontal(|ui| {
        let Some(board) = state.board.as_mut() else {
            ui.weak(t("status.no_board"));
            return;
        };

        // ── Mode trigger ──
        let curating = board.mode() == Mode::Curate;
        let label = if curating { t("tb.curate") } else { t("tb.browse") };
        let mut text = egui::RichText::new(label).strong();
        if curating {
            text = text.color(egui::Color32::WHITE);
        }
        let mut button = egui::Button::new(text);
        if curating {
            button = button.fill(CURATE_FILL);
        }
        let enabled = !board.is_submitting() && !board.exit_prompt_open();
        if ui
            .add_enabled(enabled, button)
            .on_hover_text(t("tb.mode_tooltip"))
            .clicked()
        {
            board.toggle_mode();
        }

        if curating {
            ui.separator();
            ui.label(format!("{}: {}", t("tb.selected"), board.selection().count()));
        }

        if board.is_submitting() {
            ui.separator();
            ui.spinner();
            ui.weak(t("tb.submitting"));
        }

        // Right-aligned reload
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("⟳"))
                .on_hover_text(t("menu.reload"))
                .clicked()
            {
                let location = state.settings.connection.start_location.clone();
                effects.push(state.request_load(&location));
            }
        });
    });
    effects
}
