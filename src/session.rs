//! The interaction session: one aggregate owning mode, scale, calibration
//! line, plot vertices, viewport, and derived results.
//!
//! State-machine transitions are the only mutation API, so mode and data can
//! never drift apart: switching modes atomically resets whatever the
//! abandoned mode had in progress, and results are recomputed only at the
//! transitions that can change them (finish, drag-end while finished).

use crate::calibration::{manual_scale, Calibration};
use crate::geometry::{self, Point};
use crate::persistence::SavedPlot;
use crate::plot::PlotState;
use crate::units::AreaBreakdown;
use crate::viewport::ViewportState;

/// Which interaction machine consumes pointer input right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Calibrating,
    ManualScaleEntry,
    DrawingPolygon,
}

/// Derived measurements of a finished plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub area: AreaBreakdown,
    /// Edge lengths in feet, traversal order; the last entry is the closing
    /// edge back to vertex 0.
    pub side_lengths_ft: Vec<f64>,
}

/// The single owner of all interaction state.
#[derive(Debug, Default)]
pub struct Session {
    mode: Mode,
    scale: Option<f64>,
    pub calibration: Calibration,
    pub plot: PlotState,
    pub viewport: ViewportState,
    results: Option<Results>,
    /// Generation of the snapshot the app still owes us; bumped on every
    /// finish so a superseded capture loses to the latest one.
    snapshot_due: Option<u64>,
    snapshot_generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// World pixels per foot; `None` while uncalibrated.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    // ── Mode transitions ─────────────────────────────────────────────────

    /// Switch modes, atomically resetting the machine being left. There is
    /// no resume-later: an in-progress line or vertex list does not survive
    /// leaving its mode.
    fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        match self.mode {
            Mode::Calibrating => self.calibration.reset(),
            Mode::DrawingPolygon => {
                self.plot.clear();
                self.results = None;
                self.snapshot_due = None;
            }
            Mode::Idle | Mode::ManualScaleEntry => {}
        }
        self.mode = mode;
    }

    /// Enter calibration: clears any existing line, any in-progress polygon,
    /// and the current scale (recalibration starts from nothing).
    pub fn start_calibration(&mut self) {
        self.set_mode(Mode::Calibrating);
        self.calibration.reset();
        self.plot.clear();
        self.results = None;
        self.snapshot_due = None;
        self.scale = None;
    }

    /// Enter the direct pixels-per-foot entry path.
    pub fn start_manual_scale_entry(&mut self) {
        self.set_mode(Mode::ManualScaleEntry);
    }

    /// Enter drawing mode. Requires a scale; clears prior plot state and any
    /// calibration line.
    pub fn start_drawing(&mut self) -> Result<(), String> {
        if self.scale.is_none() {
            return Err("Set the scale before drawing a plot".to_string());
        }
        self.set_mode(Mode::DrawingPolygon);
        self.plot.clear();
        self.calibration.reset();
        self.results = None;
        self.snapshot_due = None;
        Ok(())
    }

    /// Back to idle, resetting whatever was in progress.
    pub fn cancel_to_idle(&mut self) {
        self.set_mode(Mode::Idle);
    }

    // ── Pointer input (world space, post-transform) ──────────────────────

    /// Route a pointer-down to the active mode's machine.
    pub fn pointer_down(&mut self, world: Point, now_ms: f64) {
        match self.mode {
            Mode::Calibrating => self.calibration.place_point(world, now_ms),
            Mode::DrawingPolygon => self.plot.add_point(world),
            Mode::Idle | Mode::ManualScaleEntry => {}
        }
    }

    /// Route a pointer-move (live line tracking / snap hint).
    pub fn pointer_moved(&mut self, world: Point) {
        match self.mode {
            Mode::Calibrating => self.calibration.pointer_moved(world),
            Mode::DrawingPolygon => self.plot.hover(world),
            Mode::Idle | Mode::ManualScaleEntry => {}
        }
    }

    // ── Calibration actions ──────────────────────────────────────────────

    /// Confirm the drawn line against a real-world distance; sets the scale
    /// and returns to idle on success.
    pub fn confirm_calibration_distance(&mut self, real_ft: f64) -> Result<f64, String> {
        let scale = self.calibration.confirm_distance(real_ft)?;
        self.scale = Some(scale);
        self.set_mode(Mode::Idle);
        Ok(scale)
    }

    /// Apply a directly-entered scale, bypassing the line machine.
    pub fn apply_manual_scale(&mut self, value: f64) -> Result<f64, String> {
        let scale = manual_scale(value)?;
        self.scale = Some(scale);
        self.set_mode(Mode::Idle);
        Ok(scale)
    }

    /// Abandon calibration entirely.
    pub fn cancel_calibration(&mut self) {
        self.calibration.reset();
        self.set_mode(Mode::Idle);
    }

    // ── Plot actions ─────────────────────────────────────────────────────

    /// Drop the last vertex while drawing.
    pub fn undo_vertex(&mut self) {
        self.plot.undo();
    }

    /// Clear vertices, results, and any pending snapshot; stays in the
    /// current mode so the canvas remains drawable.
    pub fn clear_plot(&mut self) {
        self.plot.clear();
        self.results = None;
        self.snapshot_due = None;
    }

    /// Close the polygon and compute measurements. Also schedules a report
    /// snapshot for one frame later, once the closing edge has painted.
    pub fn finish_plot(&mut self) -> Result<&Results, String> {
        if self.scale.is_none() {
            return Err("Set the scale before finishing".to_string());
        }
        self.plot.finish()?;
        self.recompute_results();
        let results = self
            .results
            .as_ref()
            .ok_or_else(|| "measurement failed".to_string())?;
        self.snapshot_generation += 1;
        self.snapshot_due = Some(self.snapshot_generation);
        Ok(results)
    }

    /// Live vertex move during a post-finish drag.
    pub fn drag_vertex(&mut self, index: usize, world: Point) {
        self.plot.drag_vertex(index, world);
    }

    /// Drag end: re-apply the closing snap and recompute measurements.
    pub fn end_vertex_drag(&mut self, index: usize) {
        if !self.plot.is_finished() {
            return;
        }
        self.plot.end_vertex_drag(index);
        self.recompute_results();
    }

    /// Recompute derived results. Only meaningful when the plot is finished,
    /// a scale is set, and the ring has at least 3 vertices; otherwise
    /// results become `None`.
    pub fn recompute_results(&mut self) {
        let (Some(scale), true) = (self.scale, self.plot.is_finished()) else {
            self.results = None;
            return;
        };
        let points = self.plot.points();
        if points.len() < 3 {
            self.results = None;
            return;
        }
        let side_lengths_ft = match geometry::side_lengths(points, scale) {
            Ok(lengths) => lengths,
            Err(_) => {
                self.results = None;
                return;
            }
        };
        let area_px2 = geometry::shoelace_area(points);
        let sq_ft = area_px2 / (scale * scale);
        self.results = Some(Results {
            area: AreaBreakdown::from_sq_ft(sq_ft),
            side_lengths_ft,
        });
    }

    // ── Snapshot scheduling (last-write-wins) ────────────────────────────

    /// Take the pending snapshot request, if any. The app captures the
    /// canvas and tags the image with the returned generation.
    pub fn take_due_snapshot(&mut self) -> Option<u64> {
        self.snapshot_due.take()
    }

    /// Latest finish generation; a capture tagged with an older generation
    /// is stale and must be discarded.
    pub fn snapshot_generation(&self) -> u64 {
        self.snapshot_generation
    }

    // ── Persistence ──────────────────────────────────────────────────────

    /// Payload for saving. Only permitted once the plot is finished and
    /// measured.
    pub fn save_payload(&self) -> Result<SavedPlot, String> {
        if !self.plot.is_finished() || self.results.is_none() {
            return Err("Finish the plot before saving".to_string());
        }
        Ok(SavedPlot {
            scale: self.scale,
            plot_points: self.plot.points().to_vec(),
        })
    }

    /// Apply a validated saved plot: scale (when present) overwrites, the
    /// vertices replace the current list, mode becomes editable drawing, and
    /// the calibration line is cleared. Results wait for an explicit finish.
    pub fn apply_saved(&mut self, saved: SavedPlot) {
        if let Some(scale) = saved.scale {
            self.scale = Some(scale);
        }
        self.calibration.reset();
        self.plot.load(saved.plot_points);
        self.results = None;
        self.snapshot_due = None;
        self.mode = Mode::DrawingPolygon;
    }

    // ── Full reset ───────────────────────────────────────────────────────

    /// Everything back to initial state; runs when a new map image loads
    /// successfully (and only then).
    pub fn reset_for_new_image(&mut self) {
        self.mode = Mode::Idle;
        self.scale = None;
        self.calibration.reset();
        self.plot.clear();
        self.results = None;
        self.snapshot_due = None;
        self.viewport.reset();
    }
}
