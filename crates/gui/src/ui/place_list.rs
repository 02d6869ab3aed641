//! Left panel listing every place on the board

use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, BoardEffect, MarkerStyle};

/// Clicking an entry behaves like clicking its marker.
pub fn show(ui: &mut Ui, state: &mut AppState) -> Vec<BoardEffect> {
    let mut effects = Vec::new();
    ui.heading(t("list.title"));
    ui.separator();

    let Some(board) = state.board.as_mut() else {
        return effects;
    };
    if board.marker_count() == 0 {
        ui.weak(t("list.empty"));
        return effects;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for marker in board.markers() {
            let Some(place) = board.place(marker.id) else {
                continue;
            };
            let style = board.marker_style(marker.id);
            let prefix = match style {
                MarkerStyle::Selected => "☑",
                _ if board.mode().is_curate() => "☐",
                _ => "•",
            };
            let text = egui::RichText::new(format!("{prefix} {}", place.display_name()));
            let text = if marker.visible { text } else { text.weak() };

            let response = ui
                .add_enabled(marker.visible, egui::SelectableLabel::new(style == MarkerStyle::Active, text))
                .on_hover_text(place.location.to_pair_string());
            if response.clicked() {
                clicked = Some(marker.id);
            }
        }
    });

    if let Some(id) = clicked {
        effects.extend(board.click_marker(id));
    }
    effects
}
