//! Confirmation asked before leaving curate mode

use crate::i18n::t;
use crate::state::{BoardEffect, MarkerBoard};

/// Show the dialog while the board asks for it; the answer goes straight to
/// the board and its effects are returned.
pub fn show(ctx: &egui::Context, board: &mut MarkerBoard) -> Vec<BoardEffect> {
    if !board.exit_prompt_open() {
        return Vec::new();
    }

    let mut answer = None;
    egui::Window::new(t("exit.title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(300.0);
            ui.label(t("exit.message"));
            ui.add_space(4.0);
            ui.label(format!("{}: {}", t("tb.selected"), board.selection().count()));

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(t("exit.cancel")).clicked() {
                        answer = Some(false);
                    }
                    if ui.button(t("exit.confirm")).clicked() {
                        answer = Some(true);
                    }
                });
            });
        });

    if answer.is_none() {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                answer = Some(false);
            } else if i.key_pressed(egui::Key::Enter) {
                answer = Some(true);
            }
        });
    }

    match answer {
        Some(confirmed) => board.resolve_exit(confirmed),
        None => Vec::new(),
    }
}
