//! Pure geometry helpers: segment distance and the adaptive grid.

use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};

/// Base grid spacing in world units (matches the default visual grid).
pub const BASE_GRID_SIZE: f64 = 20.0;

/// Smallest comfortable on-screen distance between grid lines, in pixels.
pub const MIN_GRID_SCREEN_SPACING: f64 = 20.0;

/// Largest comfortable on-screen distance between grid lines, in pixels.
pub const MAX_GRID_SCREEN_SPACING: f64 = 100.0;

/// Absolute clamp on grid spacing in world units.
pub const GRID_SPACING_LIMIT: f64 = 1e6;

/// Distance from a point to the segment `a`→`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so a degenerate
/// segment (`a == b`) degrades to point-to-point distance.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg: Vec2 = b - a;
    let to_point: Vec2 = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return to_point.hypot();
    }
    let t = (to_point.dot(seg) / len_sq).clamp(0.0, 1.0);
    (to_point - seg * t).hypot()
}

/// Grid spacing in world units that keeps on-screen grid density inside
/// the `[MIN_GRID_SCREEN_SPACING, MAX_GRID_SCREEN_SPACING]` band.
///
/// Spacing doubles while the grid would render too dense and halves
/// while too coarse. The two conditions are mutually exclusive, so the
/// loops terminate for any zoom in the supported `[1e-8, 1e8]` range;
/// the absolute `1e-6`/`1e6` clamps bind first only at the extremes.
pub fn grid_spacing(base_size: f64, zoom: f64) -> f64 {
    let mut spacing = base_size;
    while spacing * zoom < MIN_GRID_SCREEN_SPACING && spacing < GRID_SPACING_LIMIT {
        spacing *= 2.0;
    }
    while spacing * zoom > MAX_GRID_SCREEN_SPACING && spacing > 1.0 / GRID_SPACING_LIMIT {
        spacing /= 2.0;
    }
    spacing
}

/// World coordinates of the grid intersections visible in the viewport.
///
/// Points are emitted column-major from the top-left visible corner; the
/// renderer projects them to screen space itself.
pub fn visible_grid_points(viewport: &Viewport, dims: Size, base_size: f64) -> Vec<Point> {
    let spacing = grid_spacing(base_size, viewport.zoom);
    let top_left = viewport.screen_to_world(Point::ZERO, dims);
    let bottom_right = viewport.screen_to_world(Point::new(dims.width, dims.height), dims);

    let mut points = Vec::new();
    let mut x = (top_left.x / spacing).floor() * spacing;
    while x <= bottom_right.x {
        let mut z = (top_left.y / spacing).floor() * spacing;
        while z <= bottom_right.y {
            points.push(Point::new(x, z));
            z += spacing;
        }
        x += spacing;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_dist(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let d = point_to_segment_dist(Point::new(14.0, 3.0), a, b);
        assert!((d - 5.0).abs() < 1e-12);
        let d = point_to_segment_dist(Point::new(-3.0, 4.0), a, b);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_distance_degenerate() {
        let p = Point::new(3.0, 4.0);
        let a = Point::new(0.0, 0.0);
        let d = point_to_segment_dist(p, a, a);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_spacing_stays_in_screen_band() {
        let mut zoom = 1e-8;
        while zoom <= 1e8 {
            let spacing = grid_spacing(BASE_GRID_SIZE, zoom);
            let on_screen = spacing * zoom;
            let clamped = spacing >= GRID_SPACING_LIMIT || spacing <= 1.0 / GRID_SPACING_LIMIT;
            assert!(
                clamped
                    || (MIN_GRID_SCREEN_SPACING..=MAX_GRID_SCREEN_SPACING).contains(&on_screen),
                "zoom {zoom}: spacing {spacing} renders at {on_screen} px"
            );
            zoom *= 3.7;
        }
    }

    #[test]
    fn test_grid_spacing_identity_at_unit_zoom() {
        // 20 world units at zoom 1 already sit inside the 20..100 px band.
        let spacing = grid_spacing(BASE_GRID_SIZE, 1.0);
        assert!((spacing - BASE_GRID_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_grid_points_cover_view() {
        let viewport = Viewport::default();
        let dims = Size::new(800.0, 600.0);
        let points = visible_grid_points(&viewport, dims, BASE_GRID_SIZE);
        assert!(!points.is_empty());

        // Every point projects inside the view, give or take one cell.
        let slack = grid_spacing(BASE_GRID_SIZE, viewport.zoom) * viewport.zoom;
        for point in &points {
            let screen = viewport.world_to_screen(*point, dims);
            assert!(screen.x >= -slack && screen.x <= dims.width + slack);
            assert!(screen.y >= -slack && screen.y <= dims.height + slack);
        }

        // The origin is a grid intersection and the default view shows it.
        assert!(points.contains(&Point::ZERO));
    }
}
