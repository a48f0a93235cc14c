//! Calibration: place a two-point reference line over the map and turn a
//! known real-world distance into a pixels-per-foot scale.
//!
//! The line lives in world space. Placement is guarded two ways against
//! accidental double registration: a minimum segment length and a minimum
//! time gap between successive calibration clicks.

use crate::geometry::Point;

/// Segments shorter than this (world units) are ignored as double-clicks.
pub const MIN_SEGMENT_WORLD: f64 = 1e-3;
/// Minimum gap between successive calibration clicks.
pub const CLICK_DEBOUNCE_MS: f64 = 250.0;

/// The reference line: zero, one (with a live-tracked second endpoint), or
/// two fixed endpoints. The 0/2/4-coordinate invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CalibrationLine {
    #[default]
    Empty,
    /// First endpoint fixed; `live` follows the pointer until the second
    /// click commits it.
    Tracking { first: Point, live: Point },
    /// Both endpoints fixed, awaiting confirm/redraw/cancel.
    Drawn { first: Point, second: Point },
}

impl CalibrationLine {
    /// Flat coordinate view for rendering: 0, 2, or 4 floats.
    pub fn coords(&self) -> Vec<f64> {
        match *self {
            CalibrationLine::Empty => Vec::new(),
            CalibrationLine::Tracking { first, .. } => vec![first.x, first.y],
            CalibrationLine::Drawn { first, second } => {
                vec![first.x, first.y, second.x, second.y]
            }
        }
    }

    /// Endpoints to draw right now, including the live-tracked one.
    pub fn render_segment(&self) -> Option<(Point, Point)> {
        match *self {
            CalibrationLine::Empty => None,
            CalibrationLine::Tracking { first, live } => Some((first, live)),
            CalibrationLine::Drawn { first, second } => Some((first, second)),
        }
    }

    /// Pixel length of the committed segment; `None` until both endpoints
    /// are fixed.
    pub fn pixel_length(&self) -> Option<f64> {
        match *self {
            CalibrationLine::Drawn { first, second } => Some(first.distance_to(second)),
            _ => None,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, CalibrationLine::Drawn { .. })
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, CalibrationLine::Tracking { .. })
    }
}

/// The calibration-line state machine.
#[derive(Debug, Default)]
pub struct Calibration {
    line: CalibrationLine,
    last_click_ms: Option<f64>,
}

impl Calibration {
    pub fn line(&self) -> &CalibrationLine {
        &self.line
    }

    /// Clear the line and debounce history (mode change, new map, cancel).
    pub fn reset(&mut self) {
        self.line = CalibrationLine::Empty;
        self.last_click_ms = None;
    }

    /// Handle a pointer-down in calibration mode.
    ///
    /// First accepted click fixes the first endpoint and starts live
    /// tracking; the second commits the segment unless it would be
    /// degenerately short. Clicks inside the debounce window are dropped.
    pub fn place_point(&mut self, p: Point, now_ms: f64) {
        if let Some(last) = self.last_click_ms {
            if now_ms - last < CLICK_DEBOUNCE_MS {
                return;
            }
        }
        match self.line {
            CalibrationLine::Empty => {
                self.line = CalibrationLine::Tracking { first: p, live: p };
                self.last_click_ms = Some(now_ms);
            }
            CalibrationLine::Tracking { first, .. } => {
                if first.distance_to(p) < MIN_SEGMENT_WORLD {
                    return;
                }
                self.line = CalibrationLine::Drawn { first, second: p };
                self.last_click_ms = Some(now_ms);
            }
            // Segment already committed; confirm/redraw/cancel are the only
            // ways forward.
            CalibrationLine::Drawn { .. } => {}
        }
    }

    /// Live-update the second endpoint while tracking. Visual feedback only.
    pub fn pointer_moved(&mut self, p: Point) {
        if let CalibrationLine::Tracking { first, .. } = self.line {
            self.line = CalibrationLine::Tracking { first, live: p };
        }
    }

    /// Keep the first endpoint and re-enter live tracking for a new second
    /// endpoint ("Redraw").
    pub fn undo_second_point(&mut self) {
        if let CalibrationLine::Drawn { first, .. } = self.line {
            self.line = CalibrationLine::Tracking { first, live: first };
        }
    }

    /// Drop the line entirely.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Convert the committed segment plus the user-entered real distance
    /// (feet) into a pixels-per-foot scale, clearing the line on success.
    pub fn confirm_distance(&mut self, real_distance_ft: f64) -> Result<f64, String> {
        let Some(pixel_len) = self.line.pixel_length() else {
            return Err("Draw the reference line before confirming".to_string());
        };
        if !(real_distance_ft.is_finite() && real_distance_ft > 0.0) {
            return Err("Enter a distance greater than zero".to_string());
        }
        let scale = pixel_len / real_distance_ft;
        self.reset();
        Ok(scale)
    }
}

/// Validate a directly-entered pixels-per-foot value (the manual path that
/// bypasses line drawing).
pub fn manual_scale(value: f64) -> Result<f64, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err("Scale must be a positive number".to_string())
    }
}
