//! The map canvas: paints the raster plus overlays and routes pointer and
//! touch input through the viewport transform into the active mode.
//!
//! All transform math runs against the viewport value current at event time,
//! in canvas-local screen coordinates (origin at the canvas top-left).

use eframe::egui;

use crate::geometry::Point;
use crate::session::Mode;
use crate::touch::{TouchId, TouchOutcome, TouchPhase};
use crate::viewport::clamp_zoom;

use super::MapMeasureApp;

/// Screen-space pick radius for grabbing a vertex after finish.
const VERTEX_PICK_RADIUS_PX: f64 = 10.0;

impl MapMeasureApp {
    pub(crate) fn show_canvas(&mut self, ctx: &egui::Context, now_ms: f64) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_gray(24)))
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(
                    ui.available_size(),
                    egui::Sense::click_and_drag(),
                );
                self.handle_touch_input(ctx, rect, now_ms);
                self.handle_wheel_zoom(ctx, rect, &response);
                self.handle_pointer_input(rect, &response, now_ms);
                self.paint(ui.painter(), rect);
            });
    }

    // ── Coordinate helpers ───────────────────────────────────────────────

    fn canvas_local(rect: egui::Rect, pos: egui::Pos2) -> Point {
        Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
    }

    fn to_canvas_pos(&self, rect: egui::Rect, world: Point) -> egui::Pos2 {
        let screen = self.session.viewport.world_to_screen(world);
        egui::pos2(
            rect.min.x + screen.x as f32,
            rect.min.y + screen.y as f32,
        )
    }

    // ── Input ────────────────────────────────────────────────────────────

    fn handle_touch_input(&mut self, ctx: &egui::Context, rect: egui::Rect, now_ms: f64) {
        self.touch.begin_frame();
        let touches: Vec<(u64, egui::TouchPhase, egui::Pos2)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Touch { id, phase, pos, .. } => Some((id.0, *phase, *pos)),
                    _ => None,
                })
                .collect()
        });
        for (id, phase, pos) in touches {
            let phase = match phase {
                egui::TouchPhase::Start => TouchPhase::Start,
                egui::TouchPhase::Move => TouchPhase::Move,
                egui::TouchPhase::End => TouchPhase::End,
                egui::TouchPhase::Cancel => TouchPhase::Cancel,
            };
            let local = Self::canvas_local(rect, pos);
            let outcome = self.touch.on_event(
                TouchId(id),
                phase,
                local,
                now_ms,
                &self.session.viewport,
            );
            match outcome {
                TouchOutcome::None => {}
                TouchOutcome::Viewport(viewport) => {
                    self.session.viewport = viewport;
                }
                TouchOutcome::Tap(start) => {
                    let world = self.session.viewport.screen_to_world(start);
                    self.session.pointer_down(world, now_ms);
                }
            }
        }
    }

    fn handle_wheel_zoom(
        &mut self,
        ctx: &egui::Context,
        rect: egui::Rect,
        response: &egui::Response,
    ) {
        if response.hovered() {
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                // egui's scroll sign is inverted relative to the wheel-delta
                // convention the factor formula expects.
                self.wheel.accumulate(-scroll as f64);
            }
        }
        // Flush once per frame, but only when there is a cursor to anchor on;
        // without one the accumulated delta carries over to the next frame.
        if let Some(pos) = response.hover_pos() {
            if let Some(factor) = self.wheel.take_factor() {
                let anchor = Self::canvas_local(rect, pos);
                let new_zoom = clamp_zoom(self.session.viewport.zoom * factor);
                self.session.viewport.zoom_about(anchor, new_zoom);
            }
        }
    }

    fn handle_pointer_input(
        &mut self,
        rect: egui::Rect,
        response: &egui::Response,
        now_ms: f64,
    ) {
        // Live hover: line tracking / snap hint.
        if let Some(pos) = response.hover_pos() {
            let world = self
                .session
                .viewport
                .screen_to_world(Self::canvas_local(rect, pos));
            self.session.pointer_moved(world);
        }

        // Clicks. Touch taps arrive through the touch tracker instead; the
        // backend synthesizes a pointer click from the first finger in the
        // same frame as the touch events, so any frame that carried touch
        // events (even ones the tracker rejected) must drop pointer clicks.
        if response.clicked()
            && !self.touch.saw_touch_this_frame()
            && !self.touch.touch_in_progress()
        {
            if let Some(pos) = response.interact_pointer_pos() {
                let world = self
                    .session
                    .viewport
                    .screen_to_world(Self::canvas_local(rect, pos));
                self.session.pointer_down(world, now_ms);
            }
        }

        // Post-finish vertex dragging.
        if response.drag_started() && self.session.plot.is_finished() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.dragged_vertex = self.hit_test_vertex(rect, pos);
            }
        }
        if let Some(index) = self.dragged_vertex {
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let world = self
                        .session
                        .viewport
                        .screen_to_world(Self::canvas_local(rect, pos));
                    self.session.drag_vertex(index, world);
                }
            }
            if response.drag_stopped() {
                self.session.end_vertex_drag(index);
                self.dragged_vertex = None;
            }
            return;
        }

        // Drag-pan: free when idle or once the plot is finished, never
        // mid-gesture on a pinch.
        let pannable = matches!(self.session.mode(), Mode::Idle)
            || self.session.plot.is_finished();
        if pannable && !self.touch.is_pinching() && response.dragged() {
            let delta = response.drag_delta();
            self.session
                .viewport
                .pan_by(delta.x as f64, delta.y as f64);
        }
    }

    fn hit_test_vertex(&self, rect: egui::Rect, pos: egui::Pos2) -> Option<usize> {
        let local = Self::canvas_local(rect, pos);
        self.session
            .plot
            .points()
            .iter()
            .enumerate()
            .find(|&(_, &v)| {
                self.session
                    .viewport
                    .world_to_screen(v)
                    .distance_to(local)
                    <= VERTEX_PICK_RADIUS_PX
            })
            .map(|(i, _)| i)
    }

    // ── Painting ─────────────────────────────────────────────────────────

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        if let (Some(texture), Some((w, h))) = (&self.map_texture, self.map_size) {
            let min = self.to_canvas_pos(rect, Point::new(0.0, 0.0));
            let max = self.to_canvas_pos(rect, Point::new(w as f64, h as f64));
            painter.image(
                texture.id(),
                egui::Rect::from_min_max(min, max),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Open a map image or PDF to begin",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        }

        self.paint_calibration(painter, rect);
        self.paint_plot(painter, rect);
    }

    fn paint_calibration(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some((a, b)) = self.session.calibration.line().render_segment() else {
            return;
        };
        let color = egui::Color32::from_rgb(230, 90, 70);
        let pa = self.to_canvas_pos(rect, a);
        let pb = self.to_canvas_pos(rect, b);
        painter.line_segment([pa, pb], egui::Stroke::new(2.0, color));
        painter.circle_filled(pa, 4.0, color);
        if self.session.calibration.line().is_drawn() {
            painter.circle_filled(pb, 4.0, color);
        }
    }

    fn paint_plot(&self, painter: &egui::Painter, rect: egui::Rect) {
        let points = self.session.plot.points();
        if points.is_empty() {
            return;
        }
        let edge = egui::Stroke::new(2.0, egui::Color32::from_rgb(70, 140, 230));
        let screen: Vec<egui::Pos2> = points
            .iter()
            .map(|&p| self.to_canvas_pos(rect, p))
            .collect();
        for pair in screen.windows(2) {
            painter.line_segment([pair[0], pair[1]], edge);
        }
        if self.session.plot.is_finished() && screen.len() >= 3 {
            painter.line_segment([screen[screen.len() - 1], screen[0]], edge);
        }
        for (i, &pos) in screen.iter().enumerate() {
            let highlight = i == 0 && self.session.plot.snap_hint();
            let (radius, color) = if highlight {
                (7.0, egui::Color32::from_rgb(240, 200, 40))
            } else {
                (4.5, egui::Color32::from_rgb(70, 140, 230))
            };
            painter.circle_filled(pos, radius, color);
        }
    }
}
