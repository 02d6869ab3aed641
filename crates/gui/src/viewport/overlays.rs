//! Map overlay drawing (graticule, markers, curate frame, info popup)

use egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::i18n::t;
use crate::state::settings::MarkerColors;
use crate::state::{MarkerBoard, MarkerId, MarkerStyle, OverlayKind};
use crate::ui::detail_panel;

use super::camera::MapCamera;

const CURATE_COLOR: Color32 = Color32::from_rgb(230, 120, 40);

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Background and latitude/longitude lines
pub fn draw_background(painter: &Painter, rect: Rect, camera: &MapCamera, colors: &MarkerColors) {
    let bg = rgb(colors.background);
    painter.rect_filled(rect, 0.0, bg);

    let [r, g, b] = colors.background.map(|c| (c as f32 * 0.85) as u8);
    let line_color = Color32::from_rgb(r, g, b);
    let label_color = Color32::from_gray(110);
    let stroke = Stroke::new(1.0, line_color);
    let font = egui::FontId::monospace(10.0);

    let step = camera.graticule_step();
    let decimals = (-step.log10()).ceil().max(0.0) as usize;
    let north_west = camera.unproject(rect.left_top(), rect);
    let south_east = camera.unproject(rect.right_bottom(), rect);

    let mut lng = (north_west.lng / step).floor() * step;
    while lng <= south_east.lng {
        let x = camera.project(shared::LatLng { lat: camera.center.lat, lng }, rect).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        painter.text(
            Pos2::new(x + 2.0, rect.bottom() - 2.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{lng:.decimals$}"),
            font.clone(),
            label_color,
        );
        lng += step;
    }

    let mut lat = (south_east.lat / step).floor() * step;
    while lat <= north_west.lat {
        let y = camera.project(shared::LatLng { lat, lng: camera.center.lng }, rect).y;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        painter.text(
            Pos2::new(rect.left() + 2.0, y - 2.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{lat:.decimals$}"),
            font.clone(),
            label_color,
        );
        lat += step;
    }
}

/// Visible markers, coloured by their style
pub fn draw_markers(
    painter: &Painter,
    board: &MarkerBoard,
    points: &[(MarkerId, Pos2)],
    colors: &MarkerColors,
) {
    for (id, pos) in points {
        let style = board.marker_style(*id);
        let (fill, radius) = match style {
            MarkerStyle::Normal => (rgb(colors.normal), 6.0),
            MarkerStyle::Selected => (rgb(colors.selected), 7.0),
            MarkerStyle::Active => (rgb(colors.active), 8.0),
        };
        painter.circle(*pos, radius, fill, Stroke::new(1.5, Color32::WHITE));

        if style != MarkerStyle::Normal {
            if let Some(place) = board.place(*id) {
                painter.text(
                    *pos + egui::vec2(radius + 3.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    place.display_name(),
                    egui::FontId::proportional(12.0),
                    Color32::from_gray(30),
                );
            }
        }
    }
}

/// Frame flagging curate mode
pub fn draw_curate_frame(painter: &Painter, rect: Rect) {
    painter.rect_stroke(
        rect.shrink(1.5),
        0.0,
        Stroke::new(3.0, CURATE_COLOR),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.left_top() + egui::vec2(10.0, 8.0),
        egui::Align2::LEFT_TOP,
        t("tb.curate"),
        egui::FontId::proportional(14.0),
        CURATE_COLOR,
    );
}

/// Info popup next to its marker
pub fn show_info_overlay(ctx: &egui::Context, rect: Rect, camera: &MapCamera, board: &mut MarkerBoard) {
    let Some(overlay) = board.overlay() else {
        return;
    };
    let Some(place) = board.place(overlay.marker) else {
        return;
    };
    let anchor = camera.project(place.location, rect);
    if !rect.contains(anchor) {
        return;
    }

    let mut close = false;
    egui::Area::new(egui::Id::new("marker_info_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor + egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(300.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(place.display_name()).strong());
                    if overlay.kind == OverlayKind::Click {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").clicked() {
                                close = true;
                            }
                        });
                    }
                });

                egui::Grid::new("overlay_base_grid")
                    .num_columns(2)
                    .spacing([8.0, 2.0])
                    .show(ui, |ui| {
                        if let Some(place_id) = &place.place_id {
                            ui.weak(t("overlay.place_id"));
                            ui.label(place_id.as_str());
                            ui.end_row();
                        }
                        ui.weak(t("overlay.position"));
                        ui.label(format!("{:.6}, {:.6}", place.location.lat, place.location.lng));
                        ui.end_row();
                        if let Some(rating) = place.rating {
                            ui.weak(t("overlay.rating"));
                            ui.label(format!("★ {rating:.1}"));
                            ui.end_row();
                        }
                    });

                if overlay.kind == OverlayKind::Click {
                    ui.separator();
                    detail_panel::detail_state(ui, "overlay_detail_grid", &overlay.detail);
                }
            });
        });

    if close {
        board.close_overlay();
    }
}
