use std::f64::consts::PI;

use egui::{Pos2, Rect, Vec2};
use shared::LatLng;

/// Web-Mercator tile edge in pixels
pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 2.0;
pub const MAX_ZOOM: f64 = 19.0;
pub const DEFAULT_ZOOM: f64 = 14.0;

/// Mercator latitude limit
const MAX_LAT: f64 = 85.051_128_78;

/// Slippy-map camera: a geographic center and a fractional zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapCamera {
    pub fn new(center: LatLng, zoom: Option<f64>) -> Self {
        Self {
            center,
            zoom: zoom.unwrap_or(DEFAULT_ZOOM).clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// World size in pixels at the current zoom
    fn scale(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Pixel coordinates of a point on the world map at the current zoom
    fn world(&self, p: LatLng) -> (f64, f64) {
        let scale = self.scale();
        let x = (p.lng + 180.0) / 360.0 * scale;
        let sin_lat = p.lat.to_radians().sin().clamp(-0.9999, 0.9999);
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * scale;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> LatLng {
        let scale = self.scale();
        let mut lng = x / scale * 360.0 - 180.0;
        lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
        let n = PI - 2.0 * PI * y / scale;
        let lat = n.sinh().atan().to_degrees().clamp(-MAX_LAT, MAX_LAT);
        LatLng { lat, lng }
    }

    /// Screen position of `p` inside the viewport `rect`
    pub fn project(&self, p: LatLng, rect: Rect) -> Pos2 {
        let (cx, cy) = self.world(self.center);
        let (x, y) = self.world(p);
        rect.center() + Vec2::new((x - cx) as f32, (y - cy) as f32)
    }

    /// Geographic position under a screen point
    pub fn unproject(&self, pos: Pos2, rect: Rect) -> LatLng {
        let (cx, cy) = self.world(self.center);
        let d = pos - rect.center();
        self.from_world(cx + d.x as f64, cy + d.y as f64)
    }

    /// Drag the map by a screen delta
    pub fn pan(&mut self, delta: Vec2) {
        let (cx, cy) = self.world(self.center);
        self.center = self.from_world(cx - delta.x as f64, cy - delta.y as f64);
    }

    /// Change zoom keeping the point under `anchor` fixed
    pub fn zoom_by(&mut self, delta: f64, anchor: Pos2, rect: Rect) {
        let fixed = self.unproject(anchor, rect);
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        let (fx, fy) = self.world(fixed);
        let d = anchor - rect.center();
        self.center = self.from_world(fx - d.x as f64, fy - d.y as f64);
    }

    /// Graticule spacing in degrees, roughly one line per 100+ pixels
    pub fn graticule_step(&self) -> f64 {
        let degrees_per_px = 360.0 / self.scale();
        const STEPS: [f64; 12] = [
            0.0005, 0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 5.0,
        ];
        STEPS
            .into_iter()
            .find(|s| s / degrees_per_px >= 100.0)
            .unwrap_or(10.0)
    }
}
