//! Application style configuration

use std::sync::Arc;

use eframe::egui;

/// Panel colours picked to sit next to the light map canvas
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(246, 246, 240);
const WINDOW_FILL: egui::Color32 = egui::Color32::from_rgb(252, 252, 248);
const FAINT_FILL: egui::Color32 = egui::Color32::from_rgb(236, 238, 230);
/// Same blue as a selected marker
const ACCENT: egui::Color32 = egui::Color32::from_rgb(40, 120, 230);
/// Same orange as the curate frame
const WARN: egui::Color32 = egui::Color32::from_rgb(230, 120, 40);

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    style.visuals = map_visuals();

    style.spacing.item_spacing = egui::vec2(8.0, 5.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(6);
    style.spacing.interact_size.y = font_size + 8.0;

    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn map_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = PANEL_FILL;
    visuals.window_fill = WINDOW_FILL;
    visuals.faint_bg_color = FAINT_FILL;
    visuals.extreme_bg_color = egui::Color32::WHITE;
    visuals.hyperlink_color = ACCENT;
    visuals.warn_fg_color = WARN;
    visuals.selection.bg_fill = ACCENT.linear_multiply(0.35);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    // popups float over the map, so give them a visible edge
    visuals.window_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(190));
    visuals.window_corner_radius = egui::CornerRadius::same(8);
    visuals.menu_corner_radius = egui::CornerRadius::same(6);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(5);
    }
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals
}

/// System fonts with Japanese glyphs, tried in order
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
];

/// Add a Japanese fallback font if the system has one
pub fn configure_fonts(ctx: &egui::Context) {
    let Some((path, bytes)) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)))
    else {
        tracing::debug!("No CJK font found; Japanese text may not render");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "cjk".to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    tracing::info!("Using fallback font {path}");
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

/// (style, size relative to the body font, monospace)
const TEXT_SCALES: &[(egui::TextStyle, f32, bool)] = &[
    (egui::TextStyle::Body, 1.0, false),
    (egui::TextStyle::Button, 1.0, false),
    (egui::TextStyle::Small, 0.8, false),
    (egui::TextStyle::Heading, 1.25, false),
    (egui::TextStyle::Monospace, 0.95, true),
];

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    for (text_style, scale, monospace) in TEXT_SCALES {
        let size = font_size * scale;
        let font = if *monospace {
            egui::FontId::monospace(size)
        } else {
            egui::FontId::proportional(size)
        };
        style.text_styles.insert(text_style.clone(), font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_follow_font_size() {
        let mut style = egui::Style::default();
        apply_text_styles(&mut style, 20.0);
        assert_eq!(style.text_styles[&egui::TextStyle::Body].size, 20.0);
        assert_eq!(style.text_styles[&egui::TextStyle::Small].size, 16.0);
        assert_eq!(
            style.text_styles[&egui::TextStyle::Monospace].family,
            egui::FontFamily::Monospace
        );
    }

    #[test]
    fn test_map_visuals_are_light() {
        let visuals = map_visuals();
        assert!(!visuals.dark_mode);
        assert_eq!(visuals.panel_fill, PANEL_FILL);
        assert_eq!(visuals.hyperlink_color, ACCENT);
    }
}
