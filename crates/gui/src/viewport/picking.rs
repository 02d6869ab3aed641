use egui::Pos2;

use crate::state::MarkerId;

/// Hit radius around a marker center, in pixels
pub const PICK_RADIUS: f32 = 10.0;

/// Nearest marker within `radius` of the pointer.
///
/// `points` holds the screen positions of the markers that can be hit.
pub fn pick_marker(points: &[(MarkerId, Pos2)], pointer: Pos2, radius: f32) -> Option<MarkerId> {
    points
        .iter()
        .map(|(id, pos)| (*id, pos.distance_sq(pointer)))
        .filter(|(_, d2)| *d2 <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_nearest() {
        let points = [
            (MarkerId(0), Pos2::new(100.0, 100.0)),
            (MarkerId(1), Pos2::new(106.0, 100.0)),
        ];
        let hit = pick_marker(&points, Pos2::new(104.0, 100.0), PICK_RADIUS);
        assert_eq!(hit, Some(MarkerId(1)));
    }

    #[test]
    fn test_pick_outside_radius() {
        let points = [(MarkerId(0), Pos2::new(100.0, 100.0))];
        assert_eq!(pick_marker(&points, Pos2::new(111.0, 100.0), PICK_RADIUS), None);
        assert_eq!(pick_marker(&points, Pos2::new(110.0, 100.0), PICK_RADIUS), Some(MarkerId(0)));
    }

    #[test]
    fn test_pick_empty() {
        assert_eq!(pick_marker(&[], Pos2::ZERO, PICK_RADIUS), None);
    }
}
