//! Polygon drawing: ordered vertex placement with closing-point snapping,
//! single-step undo, clear, finish, and post-finish vertex dragging.
//!
//! Snapping moves the *new or dragged point itself* onto vertex 0 when it
//! lands within the threshold; it never auto-finishes the polygon. Finishing
//! stays an explicit action.

use crate::geometry::{closing_proximity, Point, SNAP_THRESHOLD_WORLD};

/// The polygon vertex list and its open/finished flag. All mutation goes
/// through this API; edge *i* connects vertex *i* to vertex *(i+1) mod n*.
#[derive(Debug, Default)]
pub struct PlotState {
    points: Vec<Point>,
    finished: bool,
    snap_hint: bool,
}

impl PlotState {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the live pointer currently hovers within snap range of
    /// vertex 0 (renderer affordance only).
    pub fn snap_hint(&self) -> bool {
        self.snap_hint
    }

    /// Drop all vertices and flags. Idempotent on empty input; used both at
    /// mode entry and for the mid-draw clear action.
    pub fn clear(&mut self) {
        self.points.clear();
        self.finished = false;
        self.snap_hint = false;
    }

    /// Append a vertex, snapping it exactly onto vertex 0 when within the
    /// closing threshold. Ignored once finished.
    pub fn add_point(&mut self, p: Point) {
        if self.finished {
            return;
        }
        let p = match self.points.first() {
            Some(&first) if closing_proximity(p, first, SNAP_THRESHOLD_WORLD) => first,
            _ => p,
        };
        self.points.push(p);
    }

    /// Update the snap hint for the live pointer position while drawing.
    pub fn hover(&mut self, p: Point) {
        self.snap_hint = match self.points.first() {
            Some(&first) if !self.finished => closing_proximity(p, first, SNAP_THRESHOLD_WORLD),
            _ => false,
        };
    }

    /// Drop the last vertex; allowed down to zero. No-op once finished.
    pub fn undo(&mut self) {
        if !self.finished {
            self.points.pop();
        }
    }

    /// Close the ring. Requires at least 3 vertices; the caller recomputes
    /// measurements on success.
    pub fn finish(&mut self) -> Result<(), String> {
        if self.points.len() < 3 {
            return Err("A plot needs at least 3 points".to_string());
        }
        self.finished = true;
        self.snap_hint = false;
        Ok(())
    }

    /// Live-move a vertex during a post-finish drag. No snapping here; that
    /// happens at drag end.
    pub fn drag_vertex(&mut self, index: usize, p: Point) {
        if self.finished {
            if let Some(v) = self.points.get_mut(index) {
                *v = p;
            }
        }
    }

    /// Apply the closing snap at drag end. Vertex 0 is exempt: it is the
    /// snap target, not a snap candidate.
    pub fn end_vertex_drag(&mut self, index: usize) {
        if !self.finished || index == 0 || index >= self.points.len() {
            return;
        }
        let first = self.points[0];
        if closing_proximity(self.points[index], first, SNAP_THRESHOLD_WORLD) {
            self.points[index] = first;
        }
    }

    /// Replace the vertex list with saved data and re-open for editing.
    /// The loaded ring may look closed; measurement waits for an explicit
    /// finish.
    pub fn load(&mut self, points: Vec<Point>) {
        self.points = points;
        self.finished = false;
        self.snap_hint = false;
    }
}
