//! Side panel with the last fetched place detail

use egui::Ui;
use shared::DetailSummary;

use crate::i18n::t;
use crate::state::{AppState, DetailState};

const FAILED_COLOR: egui::Color32 = egui::Color32::from_rgb(190, 50, 40);

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.heading(t("detail.title"));
    ui.separator();

    let Some(board) = state.board.as_ref() else {
        return;
    };
    let panel = board.panel();
    if panel.is_empty() {
        ui.weak(t("detail.empty"));
        return;
    }

    ui.label(egui::RichText::new(&panel.title).strong());
    ui.add_space(4.0);
    detail_state(ui, "detail_panel_grid", &panel.detail);
}

/// Loading spinner, failure text or the summary grid
pub fn detail_state(ui: &mut Ui, id_salt: &str, detail: &DetailState) {
    match detail {
        DetailState::NotRequested => {}
        DetailState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak(t("overlay.loading"));
            });
        }
        DetailState::Failed(_) => {
            ui.colored_label(FAILED_COLOR, t("overlay.failed"));
        }
        DetailState::Loaded(summary) => summary_grid(ui, id_salt, summary),
    }
}

fn row(ui: &mut Ui, key: &str, value: &str) {
    ui.weak(t(key));
    ui.label(value);
    ui.end_row();
}

/// The detail fields as a two-column grid
pub fn summary_grid(ui: &mut Ui, id_salt: &str, summary: &DetailSummary) {
    egui::Grid::new(id_salt)
        .num_columns(2)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            if let Some(name) = &summary.name {
                ui.weak("");
                ui.label(egui::RichText::new(name).strong());
                ui.end_row();
            }
            if let Some(address) = &summary.address {
                row(ui, "detail.address", address);
            }
            if let Some(phone) = &summary.phone {
                row(ui, "detail.phone", phone);
            }
            if let Some(hours) = &summary.hours {
                row(ui, "detail.hours", hours);
            }
            if let Some(level) = summary.price_level {
                row(ui, "detail.price", &"¥".repeat(level.max(1) as usize));
            }
            if let Some(rating) = summary.rating {
                row(ui, "detail.rating", &format!("★ {rating:.1}"));
            }
            if !summary.categories.is_empty() {
                row(ui, "detail.types", &summary.categories.join(", "));
            }
            if let Some(website) = &summary.website {
                ui.weak(t("detail.website"));
                ui.hyperlink_to(website.as_str(), website);
                ui.end_row();
            }
        });

    if let Some(review) = &summary.review {
        ui.add_space(6.0);
        ui.weak(t("detail.review"));
        let rating = review.rating.map(|r| format!(" ★ {r:.0}")).unwrap_or_default();
        ui.label(egui::RichText::new(format!("{}{rating}", review.author)).strong());
        ui.label(review.text.as_str());
    }
}
