//! Map panel: pan/zoom, marker picking and overlay drawing

pub use gmarker_gui_lib::viewport::{camera, picking};
mod overlays;

use egui::{Pos2, Ui};

use crate::i18n::t;
use crate::state::{AppState, BoardEffect, MarkerBoard, MarkerId};
use camera::MapCamera;
use picking::{pick_marker, PICK_RADIUS};

/// Zoom levels per scroll pixel
const SCROLL_ZOOM: f64 = 0.005;

pub struct MapPanel {
    camera: Option<MapCamera>,
    /// Board the camera was set up for
    generation: u64,
    /// Marker under the pointer last frame
    hovered: Option<MarkerId>,
}

impl MapPanel {
    pub fn new() -> Self {
        Self {
            camera: None,
            generation: 0,
            hovered: None,
        }
    }

    /// Center the map on the board's center at its initial zoom
    pub fn reset_camera(&mut self, board: &MarkerBoard) {
        self.camera = Some(MapCamera::new(board.center(), board.zoom()));
        self.generation = board.generation();
        self.hovered = None;
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) -> Vec<BoardEffect> {
        let colors = state.settings.markers.clone();
        if state.board.is_none() {
            return self.show_empty(ui, state);
        }
        let Some(board) = state.board.as_mut() else {
            return Vec::new();
        };

        if self.generation != board.generation() {
            self.reset_camera(board);
        }
        let mut camera = self
            .camera
            .unwrap_or_else(|| MapCamera::new(board.center(), board.zoom()));

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Pan / zoom ──────────────────────────────────
        if response.dragged() {
            camera.pan(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let anchor = response.hover_pos().unwrap_or(rect.center());
                camera.zoom_by(scroll as f64 * SCROLL_ZOOM, anchor, rect);
            }
        }

        let points: Vec<(MarkerId, Pos2)> = board
            .visible_markers()
            .map(|m| (m.id, camera.project(m.position, rect)))
            .collect();

        // ── Hover ───────────────────────────────────────
        let hovered = response
            .hover_pos()
            .and_then(|p| pick_marker(&points, p, PICK_RADIUS));
        if hovered != self.hovered {
            board.hover_marker(hovered);
            self.hovered = hovered;
        }
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        // ── Click ───────────────────────────────────────
        let mut effects = Vec::new();
        if response.clicked() {
            let picked = response
                .interact_pointer_pos()
                .and_then(|p| pick_marker(&points, p, PICK_RADIUS));
            match picked {
                Some(id) => effects.extend(board.click_marker(id)),
                None => board.click_empty(),
            }
        }

        // ── Drawing ─────────────────────────────────────
        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            overlays::draw_background(&painter, rect, &camera, &colors);
            overlays::draw_markers(&painter, board, &points, &colors);
            if board.mode().is_curate() {
                overlays::draw_curate_frame(&painter, rect);
            }
            overlays::show_info_overlay(ui.ctx(), rect, &camera, board);
        }

        self.camera = Some(camera);
        effects
    }

    /// No board: spinner while loading, else the load error and a retry button
    fn show_empty(&mut self, ui: &mut Ui, state: &mut AppState) -> Vec<BoardEffect> {
        let mut effects = Vec::new();
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.4);
            if state.loading {
                ui.spinner();
                ui.weak(t("status.loading"));
                return;
            }
            match &state.load_error {
                Some(error) => {
                    ui.heading(t("load.error_title"));
                    ui.colored_label(egui::Color32::from_rgb(190, 50, 40), error.as_str());
                }
                None => {
                    ui.weak(t("status.no_board"));
                }
            }
            ui.add_space(8.0);
            if ui.button(t("load.retry")).clicked() {
                let location = state.settings.connection.start_location.clone();
                effects.push(state.request_load(&location));
            }
        });
        effects
    }
}
