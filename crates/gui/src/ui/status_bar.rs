use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, Mode, Notice};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(190, 40, 30);

/// User-facing text of a notice
pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::EnteredCurate => t("notice.entered_curate").to_string(),
        Notice::ExitDeclined => t("notice.exit_declined").to_string(),
        Notice::Submitting => t("notice.submitting").to_string(),
        Notice::Submitted(status) => format!("{} ({status})", t("notice.submitted")),
        Notice::SubmitFailed(reason) => format!("{}: {reason}", t("notice.submit_failed")),
        Notice::LoadFailed(reason) => format!("{}: {reason}", t("notice.load_failed")),
    }
}

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        match &state.board {
            Some(board) => {
                ui.weak(format!("{}: {}", t("status.markers"), board.marker_count()));
                if board.skipped() > 0 {
                    ui.colored_label(
                        ui.visuals().warn_fg_color,
                        format!("{}: {}", t("status.skipped"), board.skipped()),
                    );
                }

                ui.separator();

                let mode = match board.mode() {
                    Mode::Browse => t("tb.browse"),
                    Mode::Curate => t("tb.curate"),
                };
                ui.label(mode);
                if board.mode().is_curate() {
                    ui.label(format!("{}: {}", t("status.selected"), board.selection().count()));
                }

                if let Some(notice) = board.notice() {
                    ui.separator();
                    let text = notice_text(notice);
                    if notice.is_error() {
                        ui.colored_label(ERROR_COLOR, text);
                    } else {
                        ui.weak(text);
                    }
                }
            }
            None => {
                ui.weak(t("status.no_board"));
            }
        }

        if state.loading {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(170, 100, 20), t("status.loading"));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("gmarker v", env!("CARGO_PKG_VERSION")));
        });
    });
}
