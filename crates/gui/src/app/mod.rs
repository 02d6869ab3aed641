//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Handle;

use crate::backend::HttpBackend;
use crate::driver::BoardDriver;
use crate::i18n::{set_lang, t};
use crate::state::{AppState, BoardEffect, Notice};
use crate::ui::{detail_panel, exit_dialog, place_list, status_bar, toolbar};
use crate::viewport::MapPanel;
use crate::CliArgs;

/// Main application
pub struct MarkerApp {
    state: AppState,
    driver: Option<BoardDriver<HttpBackend>>,
    handle: Handle,
    ctx: egui::Context,
    map: MapPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl MarkerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, handle: Handle, args: CliArgs) -> Self {
        let mut state = AppState::default();
        if let Some(base_url) = args.base_url {
            state.settings.connection.base_url = base_url;
        }
        set_lang(state.settings.ui.language);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);
        styles::configure_fonts(&cc.egui_ctx);

        let last_font_size = state.settings.ui.font_size;
        let mut app = Self {
            state,
            driver: None,
            handle,
            ctx: cc.egui_ctx.clone(),
            map: MapPanel::new(),
            last_font_size,
        };
        app.connect();

        // Initial board: CLI file takes priority, then a backend location
        if let Some(payload) = args.board {
            let mode = app.state.settings.initial_mode();
            app.state.load_payload(&payload, mode);
        } else {
            let location = args
                .location
                .unwrap_or_else(|| app.state.settings.connection.start_location.clone());
            let effect = app.state.request_load(&location);
            app.dispatch(vec![effect]);
        }

        app
    }

    /// (Re)create the backend client from the configured base URL
    fn connect(&mut self) {
        let base_url = self.state.settings.connection.base_url.clone();
        match HttpBackend::new(&base_url) {
            Ok(backend) => {
                tracing::info!("Backend at {}", backend.base_url());
                let ctx = self.ctx.clone();
                self.driver = Some(
                    BoardDriver::new(self.handle.clone(), Arc::new(backend))
                        .with_notify(move || ctx.request_repaint()),
                );
            }
            Err(e) => {
                tracing::error!("Cannot use backend {base_url}: {e}");
                self.driver = None;
                self.state.load_error = Some(e.to_string());
            }
        }
    }

    fn dispatch(&mut self, effects: Vec<BoardEffect>) {
        if effects.is_empty() {
            return;
        }
        match &self.driver {
            Some(driver) => driver.dispatch(effects),
            None => {
                tracing::warn!("No backend; dropping {} requests", effects.len());
                self.state.loading = false;
                if let Some(board) = self.state.board.as_mut() {
                    board.set_notice(Notice::LoadFailed(t("notice.load_failed").to_string()));
                }
            }
        }
    }
}

impl eframe::App for MarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        let mut effects = Vec::new();

        // ── Completed requests ───────────────────────────────
        if let Some(driver) = self.driver.as_mut() {
            for event in driver.poll() {
                effects.extend(self.state.apply_event(event));
            }
        }

        effects.extend(keyboard::handle_keyboard(ctx, &mut self.state, &mut self.map));

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                effects.extend(menus::file_menu(ui, &mut self.state));
                menus::view_menu(ui, &mut self.state, &mut self.map);
            });
        });

        // ── Settings window ──────────────────────────────────
        let reconnect = menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                effects.extend(toolbar::show(ui, &mut self.state));
            });

        // ── Exit confirmation ────────────────────────────────
        if let Some(board) = self.state.board.as_mut() {
            effects.extend(exit_dialog::show(ctx, board));
        }

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: place list ───────────────────────────
        if self.state.panels.place_list {
            egui::SidePanel::left("place_list")
                .default_width(220.0)
                .width_range(150.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    effects.extend(place_list::show(ui, &mut self.state));
                });
        }

        // ── Right panel: detail ──────────────────────────────
        if self.state.panels.detail {
            egui::SidePanel::right("detail_panel")
                .default_width(280.0)
                .width_range(200.0..=460.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        detail_panel::show(ui, &self.state);
                    });
                });
        }

        // ── Central panel: map ───────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                effects.extend(self.map.show(ui, &mut self.state));
            });

        if reconnect {
            set_lang(self.state.settings.ui.language);
            let url = &self.state.settings.connection.base_url;
            let changed = self
                .driver
                .as_ref()
                .map_or(true, |d| d.backend().base_url().as_str() != url.as_str());
            if changed {
                self.connect();
            }
        }
        self.dispatch(effects);

        if self.state.sync_persisted_mode() {
            self.state.settings.save();
        }
    }
}
