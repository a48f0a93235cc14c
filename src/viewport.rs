//! Viewport state: pan/zoom, the screen↔world coordinate transform, and the
//! accumulate-then-flush wheel zoom.
//!
//! Screen coordinates are canvas-local pixels (origin at the canvas top-left);
//! world coordinates are unscaled map pixels. The transform must always be
//! evaluated against the viewport value current at event time — callers pass
//! the live state, never a stale copy.

use crate::geometry::Point;

/// Lower zoom clamp.
pub const ZOOM_MIN: f64 = 0.1;
/// Upper zoom clamp.
pub const ZOOM_MAX: f64 = 10.0;
/// Base of the wheel-delta → zoom-factor exponential.
pub const WHEEL_ZOOM_BASE: f64 = 1.0015;

/// Current pan offset (screen px) and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub pan: Point,
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            pan: Point::new(0.0, 0.0),
            zoom: 1.0,
        }
    }
}

/// Clamp a zoom factor to the allowed range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

impl ViewportState {
    /// Back to origin pan at 1:1 zoom (new map loaded).
    pub fn reset(&mut self) {
        *self = ViewportState::default();
    }

    /// Screen → world: `(screen - pan) / zoom`.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// World → screen: inverse of [`Self::screen_to_world`].
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }

    /// Apply a new zoom while keeping the world point under `screen_anchor`
    /// fixed on screen. The anchor pan recompute is
    /// `pan = anchor − world_under_anchor × new_zoom`.
    pub fn zoom_about(&mut self, screen_anchor: Point, new_zoom: f64) {
        let new_zoom = clamp_zoom(new_zoom);
        let world = self.screen_to_world(screen_anchor);
        self.zoom = new_zoom;
        self.pan = Point::new(
            screen_anchor.x - world.x * new_zoom,
            screen_anchor.y - world.y * new_zoom,
        );
    }

    /// Translate the pan offset by a screen-space delta (drag panning).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }
}

/// Accumulates raw wheel deltas across events and converts them into a single
/// multiplicative zoom factor once per frame. High-frequency wheel streams
/// therefore cost one recompute per displayed frame, not one per event.
#[derive(Debug, Default)]
pub struct WheelZoom {
    accumulated: f64,
}

impl WheelZoom {
    /// Add a raw wheel delta (positive = scroll up in egui's convention).
    pub fn accumulate(&mut self, delta: f64) {
        self.accumulated += delta;
    }

    /// Drain the accumulator into a zoom factor, or `None` when nothing was
    /// scrolled since the last flush. Factor is `1.0015^(-delta)`.
    pub fn take_factor(&mut self) -> Option<f64> {
        if self.accumulated == 0.0 {
            return None;
        }
        let factor = WHEEL_ZOOM_BASE.powf(-self.accumulated);
        self.accumulated = 0.0;
        Some(factor)
    }
}
