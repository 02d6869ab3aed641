//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::{AppSettings, AppState, BoardEffect, CurateStyle};
use crate::viewport::MapPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) -> Vec<BoardEffect> {
    let mut effects = Vec::new();
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open_board")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_board_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match shared::BoardPayload::from_json(&json) {
                        Ok(payload) => {
                            let mode = state.settings.initial_mode();
                            if state.load_payload(&payload, mode) {
                                tracing::info!("Loaded board from {}", path.display());
                            }
                        }
                        Err(e) => tracing::error!("Failed to parse board: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read file: {e}"),
                }
            }
        }
        if ui
            .add_enabled(!state.loading, egui::Button::new(t("menu.reload")))
            .clicked()
        {
            let location = state.settings.connection.start_location.clone();
            effects.push(state.request_load(&location));
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.settings")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
    effects
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, map: &mut MapPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.place_list, t("menu.place_list"));
        ui.checkbox(&mut state.panels.detail, t("menu.detail_panel"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            if let Some(board) = state.board.as_ref() {
                map.reset_camera(board);
            }
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::Ja, "日本語").clicked() {
                switch_language(state, Lang::Ja);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                switch_language(state, Lang::En);
                ui.close_menu();
            }
        });
    });
}

fn switch_language(state: &mut AppState, l: Lang) {
    set_lang(l);
    state.settings.ui.language = l;
    state.settings.save();
}

/// Show the settings window. Returns true when Apply was clicked.
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) -> bool {
    let mut open = state.show_settings_window;
    let mut applied = false;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_connection_settings(ui, &mut state.settings);
                show_board_settings(ui, &mut state.settings);
                show_marker_settings(ui, &mut state.settings);
                show_ui_settings(ui, &mut state.settings);
                applied = show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = state.show_settings_window && open;
    applied
}

fn show_connection_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.connection"));
    egui::Grid::new("connection_grid")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            ui.label(t("settings.base_url"));
            ui.text_edit_singleline(&mut settings.connection.base_url);
            ui.end_row();

            ui.label(t("settings.start_location"));
            ui.text_edit_singleline(&mut settings.connection.start_location);
            ui.end_row();

            ui.label(t("settings.results_location"));
            ui.text_edit_singleline(&mut settings.connection.results_location);
            ui.end_row();
        });
    ui.add_space(10.0);
}

fn show_board_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.board"));
    ui.checkbox(&mut settings.board.hover_preview, t("settings.hover_preview"));
    ui.checkbox(&mut settings.board.persist_mode, t("settings.persist_mode"));

    ui.horizontal(|ui| {
        ui.label(t("settings.curate_style"));
        egui::ComboBox::from_id_salt("curate_style_combo")
            .selected_text(match settings.board.curate_style {
                CurateStyle::Toggle => t("settings.style_toggle"),
                CurateStyle::Collect => t("settings.style_collect"),
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut settings.board.curate_style,
                    CurateStyle::Toggle,
                    t("settings.style_toggle"),
                );
                ui.selectable_value(
                    &mut settings.board.curate_style,
                    CurateStyle::Collect,
                    t("settings.style_collect"),
                );
            });
    });
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_marker_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.markers"));
    color_row(ui, t("settings.color_normal"), &mut settings.markers.normal);
    color_row(ui, t("settings.color_selected"), &mut settings.markers.selected);
    color_row(ui, t("settings.color_active"), &mut settings.markers.active);
    color_row(ui, t("settings.color_background"), &mut settings.markers.background);
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut applied = false;
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
            applied = true;
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
    applied
}
