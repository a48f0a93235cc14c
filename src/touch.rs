//! Touch gesture disambiguation: pinch-to-zoom and tap-vs-drag.
//!
//! [`TouchTracker`] consumes raw per-finger events (id, phase, canvas-local
//! position, timestamp) and decides what they mean:
//!
//! * Two fingers down → pinch. Zoom is `start_zoom × (distance/start_distance)`
//!   re-anchored around the *current* midpoint against the *gesture-start*
//!   zoom/pan basis, so per-move rounding never accumulates into drift.
//!   Distance changes below a jitter deadzone are ignored.
//! * A lone finger that goes down and up quickly enough, without travelling
//!   far and without a second finger ever joining, is a tap and is forwarded
//!   to the active mode at its *start* position.
//!
//! Timestamps are plain `f64` milliseconds supplied by the caller, which keeps
//! the whole machine deterministic under test.

use std::collections::HashMap;

use crate::geometry::Point;
use crate::viewport::{clamp_zoom, ViewportState};

/// Pinch distance changes smaller than this (px) are treated as jitter.
pub const PINCH_JITTER_PX: f64 = 0.5;
/// Maximum finger travel (px) for a touch session to still count as a tap.
pub const TAP_MAX_TRAVEL_PX: f64 = 6.0;
/// A second finger joining within this window of touch-start voids the tap.
pub const PINCH_GRACE_MS: f64 = 200.0;
/// Touches shorter than this are noise, not taps.
pub const TAP_MIN_DURATION_MS: f64 = 50.0;

/// Identity of one finger, stable from its Start to its End/Cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

/// Lifecycle phase of one finger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// What a touch event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// Nothing actionable (mid-gesture, voided session, noise).
    None,
    /// A qualifying tap at its original touch-start position (screen space).
    Tap(Point),
    /// Pinch produced a new viewport (already clamped and re-anchored).
    Viewport(ViewportState),
}

#[derive(Debug, Clone, Copy)]
struct ActiveTouch {
    last: Point,
}

/// Single-finger "touch session" opened at first touch-start and judged when
/// the last finger lifts.
#[derive(Debug, Clone, Copy)]
struct TouchSession {
    start_pos: Point,
    start_ms: f64,
    max_travel: f64,
    /// Set when a second finger joined at any point during the session.
    pinch_joined: bool,
    /// True when that join happened within [`PINCH_GRACE_MS`] of touch-start.
    joined_within_grace: bool,
}

#[derive(Debug, Clone, Copy)]
struct PinchState {
    ids: [TouchId; 2],
    start_distance: f64,
    /// Zoom/pan snapshot at pinch start; every move re-anchors against this
    /// basis, not the continuously updated viewport.
    start_viewport: ViewportState,
    last_distance: f64,
}

/// Gesture state machine over raw touch events.
#[derive(Debug, Default)]
pub struct TouchTracker {
    touches: HashMap<TouchId, ActiveTouch>,
    session: Option<TouchSession>,
    pinch: Option<PinchState>,
    saw_touch_this_frame: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a pinch gesture is in progress.
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// True while at least one finger is down.
    pub fn touch_in_progress(&self) -> bool {
        !self.touches.is_empty()
    }

    /// Clear the per-frame touch marker. Call once at the top of each input
    /// pass, before feeding that frame's events.
    pub fn begin_frame(&mut self) {
        self.saw_touch_this_frame = false;
    }

    /// True when any touch event was fed since [`Self::begin_frame`].
    ///
    /// Backends synthesize pointer clicks from the first finger; while this
    /// is set, those emulated clicks must be dropped so touch input reaches
    /// the session only through [`TouchOutcome`]. In particular a touch the
    /// tracker rejects (noise, voided session) still marks the frame, so its
    /// emulated click cannot sneak in either.
    pub fn saw_touch_this_frame(&self) -> bool {
        self.saw_touch_this_frame
    }

    /// Drop all gesture state (mode switch, new map).
    pub fn reset(&mut self) {
        self.touches.clear();
        self.session = None;
        self.pinch = None;
        self.saw_touch_this_frame = false;
    }

    /// Feed one finger event. `viewport` is the live viewport at event time;
    /// it is only read when a pinch starts or moves.
    pub fn on_event(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Point,
        now_ms: f64,
        viewport: &ViewportState,
    ) -> TouchOutcome {
        self.saw_touch_this_frame = true;
        match phase {
            TouchPhase::Start => self.on_start(id, pos, now_ms, viewport),
            TouchPhase::Move => self.on_move(id, pos),
            TouchPhase::End => self.on_end(id, now_ms, false),
            TouchPhase::Cancel => self.on_end(id, now_ms, true),
        }
    }

    fn on_start(
        &mut self,
        id: TouchId,
        pos: Point,
        now_ms: f64,
        viewport: &ViewportState,
    ) -> TouchOutcome {
        let prior_count = self.touches.len();
        self.touches.insert(id, ActiveTouch { last: pos });

        match prior_count {
            0 => {
                self.session = Some(TouchSession {
                    start_pos: pos,
                    start_ms: now_ms,
                    max_travel: 0.0,
                    pinch_joined: false,
                    joined_within_grace: false,
                });
            }
            1 => {
                // Second finger: void the tap session, pinch takes over.
                if let Some(session) = self.session.as_mut() {
                    session.pinch_joined = true;
                    if now_ms - session.start_ms <= PINCH_GRACE_MS {
                        session.joined_within_grace = true;
                    }
                }
                let ids: Vec<TouchId> = self.touches.keys().copied().collect();
                let a = self.touches[&ids[0]].last;
                let b = self.touches[&ids[1]].last;
                let distance = a.distance_to(b);
                self.pinch = Some(PinchState {
                    ids: [ids[0], ids[1]],
                    start_distance: distance,
                    start_viewport: *viewport,
                    last_distance: distance,
                });
            }
            // Third finger and beyond changes nothing.
            _ => {}
        }
        TouchOutcome::None
    }

    fn on_move(&mut self, id: TouchId, pos: Point) -> TouchOutcome {
        if let Some(touch) = self.touches.get_mut(&id) {
            touch.last = pos;
        } else {
            return TouchOutcome::None;
        }
        if let Some(session) = self.session.as_mut() {
            let travel = session.start_pos.distance_to(pos);
            if travel > session.max_travel {
                session.max_travel = travel;
            }
        }

        let Some(pinch) = self.pinch.as_mut() else {
            return TouchOutcome::None;
        };
        if !pinch.ids.contains(&id) {
            return TouchOutcome::None;
        }
        let (Some(a), Some(b)) = (
            self.touches.get(&pinch.ids[0]).map(|t| t.last),
            self.touches.get(&pinch.ids[1]).map(|t| t.last),
        ) else {
            return TouchOutcome::None;
        };
        let distance = a.distance_to(b);
        if (distance - pinch.last_distance).abs() < PINCH_JITTER_PX {
            return TouchOutcome::None;
        }
        pinch.last_distance = distance;
        if pinch.start_distance <= f64::EPSILON {
            return TouchOutcome::None;
        }

        let basis = pinch.start_viewport;
        let new_zoom = clamp_zoom(basis.zoom * (distance / pinch.start_distance));
        let midpoint = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        // Anchor the world point under the current midpoint using the start
        // basis, so repeated moves do not compound.
        let world = basis.screen_to_world(midpoint);
        let pan = Point::new(
            midpoint.x - world.x * new_zoom,
            midpoint.y - world.y * new_zoom,
        );
        TouchOutcome::Viewport(ViewportState {
            pan,
            zoom: new_zoom,
        })
    }

    fn on_end(&mut self, id: TouchId, now_ms: f64, cancelled: bool) -> TouchOutcome {
        self.touches.remove(&id);

        if let Some(pinch) = self.pinch {
            if pinch.ids.contains(&id) {
                self.pinch = None;
            }
        }
        if !self.touches.is_empty() {
            return TouchOutcome::None;
        }

        // Last finger lifted: judge the session.
        let Some(session) = self.session.take() else {
            return TouchOutcome::None;
        };
        if cancelled {
            return TouchOutcome::None;
        }
        if session.pinch_joined || session.joined_within_grace {
            return TouchOutcome::None;
        }
        if session.max_travel > TAP_MAX_TRAVEL_PX {
            return TouchOutcome::None;
        }
        if now_ms - session.start_ms < TAP_MIN_DURATION_MS {
            return TouchOutcome::None;
        }
        TouchOutcome::Tap(session.start_pos)
    }
}
