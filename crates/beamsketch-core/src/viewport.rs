//! Viewport state and pan/zoom control.
//!
//! The viewport maps world coordinates to screen pixels: `pan` is the
//! world point shown at the view center, `zoom` the pixels-per-world-unit
//! scale. The vertical world axis (structural `z`, carried in
//! [`Point::y`]) maps screen-down.

use crate::error::CoreError;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom level. The range is deliberately extreme so
/// dimensionless, unit-agnostic models stay navigable.
pub const MIN_ZOOM: f64 = 1e-8;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 1e8;

/// Multiplier for toolbar zoom in/out steps.
pub const ZOOM_STEP_FACTOR: f64 = 1.5;

/// Screen-pixel padding used when fitting the view to model bounds.
pub const FIT_PADDING: f64 = 50.0;

/// Pan/zoom state of one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World point mapped to the center of the view.
    pub pan: Point,
    /// Pixels per world unit. Invariant: `min_zoom <= zoom <= max_zoom`.
    pub zoom: f64,
    /// Lower zoom clamp.
    pub min_zoom: f64,
    /// Upper zoom clamp.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// A pan drag in progress.
///
/// The viewport is captured by value at gesture start; later viewport or
/// view-size changes never invalidate the anchor. The live zoom is read
/// at each update, so zooming mid-drag stays consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGesture {
    /// Screen position where the drag started.
    pub anchor_screen: Point,
    /// Viewport state at drag start.
    pub anchor: Viewport,
}

impl Viewport {
    /// Create a viewport at the default position and zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a world point to screen pixels.
    pub fn world_to_screen(&self, world: Point, dims: Size) -> Point {
        Point::new(
            (world.x - self.pan.x) * self.zoom + dims.width / 2.0,
            (world.y - self.pan.y) * self.zoom + dims.height / 2.0,
        )
    }

    /// Convert a screen point to world coordinates. Exact inverse of
    /// [`Viewport::world_to_screen`].
    pub fn screen_to_world(&self, screen: Point, dims: Size) -> Point {
        Point::new(
            (screen.x - dims.width / 2.0) / self.zoom + self.pan.x,
            (screen.y - dims.height / 2.0) / self.zoom + self.pan.y,
        )
    }

    /// Zoom by `factor`, keeping the world point under `anchor` fixed on
    /// screen. When the clamp caps the zoom the anchor stays as close as
    /// the clamp allows.
    pub fn zoom_at(&mut self, dims: Size, anchor: Point, factor: f64) -> Result<(), CoreError> {
        check_factor(factor)?;
        check_point(anchor)?;

        let world_before = self.screen_to_world(anchor, dims);
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let world_after = self.screen_to_world(anchor, dims);
        self.pan += world_before - world_after;
        Ok(())
    }

    /// Zoom by `factor` without an anchor; pan is unchanged. Used for
    /// toolbar zoom in/out.
    pub fn zoom_step(&mut self, factor: f64) -> Result<(), CoreError> {
        check_factor(factor)?;
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        Ok(())
    }

    /// Reset zoom to 100%; pan is unchanged.
    pub fn zoom_to_actual(&mut self) {
        self.zoom = 1.0;
    }

    /// Fit the view to the given world bounds with `padding` screen
    /// pixels on every side. Empty bounds reset to the default view.
    pub fn fit_to_bounds(&mut self, bounds: Option<Rect>, dims: Size, padding: f64) {
        let Some(bounds) = bounds else {
            self.zoom = 1.0;
            self.pan = Point::ZERO;
            return;
        };

        let fit_width = dims.width / (bounds.width() + 2.0 * padding);
        let fit_height = dims.height / (bounds.height() + 2.0 * padding);
        self.zoom = fit_width
            .min(fit_height)
            .min(self.max_zoom)
            .max(self.min_zoom);
        self.pan = bounds.center();
    }

    /// Start a pan drag at the given screen position.
    pub fn begin_pan(&self, screen: Point) -> PanGesture {
        PanGesture {
            anchor_screen: screen,
            anchor: *self,
        }
    }

    /// Update the pan for a drag in progress. The world under the cursor
    /// follows the cursor, so the pan moves against the drag direction.
    pub fn continue_pan(&mut self, gesture: &PanGesture, screen: Point) {
        let delta: Vec2 = (screen - gesture.anchor_screen) / self.zoom;
        self.pan = gesture.anchor.pan - delta;
    }
}

fn check_factor(factor: f64) -> Result<(), CoreError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidZoomFactor(factor))
    }
}

fn check_point(point: Point) -> Result<(), CoreError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(CoreError::NonFinitePoint {
            x: point.x,
            y: point.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: Size = Size::new(800.0, 600.0);

    fn assert_close(a: Point, b: Point, tol: f64) {
        assert!(
            (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_center_maps_to_pan() {
        let viewport = Viewport {
            pan: Point::new(12.0, -7.0),
            ..Viewport::default()
        };
        let center = Point::new(400.0, 300.0);
        assert_close(viewport.world_to_screen(viewport.pan, DIMS), center, 1e-12);
        assert_close(viewport.screen_to_world(center, DIMS), viewport.pan, 1e-12);
    }

    #[test]
    fn test_round_trip_across_zoom_range() {
        let world = Point::new(123.456, -78.9);
        for exponent in [-8, -4, -1, 0, 1, 4, 8] {
            let viewport = Viewport {
                pan: Point::new(3.0, 5.0),
                zoom: 10f64.powi(exponent),
                ..Viewport::default()
            };
            let back = viewport.screen_to_world(viewport.world_to_screen(world, DIMS), DIMS);
            // At extreme zoom-out the inverse divides by a tiny zoom, so
            // precision is relative to the visible world extent.
            let extent = DIMS.width / viewport.zoom;
            let tol = 1e-9 * world.x.abs().max(world.y.abs()).max(extent).max(1.0);
            assert_close(back, world, tol);
        }
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut viewport = Viewport {
            pan: Point::new(2.0, 4.0),
            zoom: 1.0,
            ..Viewport::default()
        };
        let anchor = Point::new(500.0, 300.0);
        let world_before = viewport.screen_to_world(anchor, DIMS);

        viewport.zoom_at(DIMS, anchor, 1.1).unwrap();

        assert!((viewport.zoom - 1.1).abs() < 1e-12);
        let world_after = viewport.screen_to_world(anchor, DIMS);
        assert_close(world_after, world_before, 1e-9);
    }

    #[test]
    fn test_zoom_at_clamps() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(DIMS, Point::new(0.0, 0.0), 1e20).unwrap();
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON * MAX_ZOOM);

        viewport.zoom_at(DIMS, Point::new(0.0, 0.0), 1e-40).unwrap();
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_rejects_bad_factor() {
        let mut viewport = Viewport::default();
        assert_eq!(
            viewport.zoom_at(DIMS, Point::ZERO, 0.0),
            Err(CoreError::InvalidZoomFactor(0.0))
        );
        assert_eq!(
            viewport.zoom_at(DIMS, Point::ZERO, -2.0),
            Err(CoreError::InvalidZoomFactor(-2.0))
        );
        assert!(viewport.zoom_at(DIMS, Point::ZERO, f64::NAN).is_err());
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_rejects_non_finite_anchor() {
        let mut viewport = Viewport::default();
        let result = viewport.zoom_at(DIMS, Point::new(f64::INFINITY, 0.0), 1.1);
        assert!(matches!(result, Err(CoreError::NonFinitePoint { .. })));
    }

    #[test]
    fn test_zoom_step_leaves_pan() {
        let mut viewport = Viewport {
            pan: Point::new(9.0, 9.0),
            ..Viewport::default()
        };
        viewport.zoom_step(ZOOM_STEP_FACTOR).unwrap();
        assert!((viewport.zoom - 1.5).abs() < f64::EPSILON);
        assert_eq!(viewport.pan, Point::new(9.0, 9.0));
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut viewport = Viewport::default();
        let bounds = Rect::new(-10.0, -5.0, 10.0, 5.0);
        viewport.fit_to_bounds(Some(bounds), DIMS, FIT_PADDING);

        // Width limits: 800 / (20 + 100) vs 600 / (10 + 100).
        let expected = (800.0 / 120.0f64).min(600.0 / 110.0);
        assert!((viewport.zoom - expected).abs() < 1e-12);
        assert_eq!(viewport.pan, Point::ZERO);
    }

    #[test]
    fn test_fit_to_empty_bounds_resets() {
        let mut viewport = Viewport {
            pan: Point::new(100.0, 100.0),
            zoom: 42.0,
            ..Viewport::default()
        };
        viewport.fit_to_bounds(None, DIMS, FIT_PADDING);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.pan, Point::ZERO);
    }

    #[test]
    fn test_pan_gesture_moves_world_with_cursor() {
        let mut viewport = Viewport {
            zoom: 2.0,
            ..Viewport::default()
        };
        let gesture = viewport.begin_pan(Point::new(100.0, 100.0));
        viewport.continue_pan(&gesture, Point::new(150.0, 80.0));

        // Dragging right by 50 px at zoom 2 moves the pan left by 25 units.
        assert_close(viewport.pan, Point::new(-25.0, 10.0), 1e-12);
    }

    #[test]
    fn test_pan_gesture_uses_live_zoom() {
        let mut viewport = Viewport::default();
        let gesture = viewport.begin_pan(Point::new(0.0, 0.0));
        viewport.zoom_step(4.0).unwrap();
        viewport.continue_pan(&gesture, Point::new(40.0, 0.0));

        // 40 px at the live zoom of 4 is 10 world units.
        assert_close(viewport.pan, Point::new(-10.0, 0.0), 1e-12);
    }
}
