//! The MapMeasure application: eframe wiring around the interaction session.
//!
//! Split into focused sub-modules:
//!
//! | Sub-module   | Responsibility |
//! | ------------ | -------------- |
//! | [`canvas`]   | Central map canvas: input routing, pan/zoom, overlay painting |
//! | [`toolbar`]  | Top bar actions and their precondition guards |
//! | [`dialogs`]  | Distance / manual-scale entry modals |
//! | [`run`]      | Native entry point and icon loading |

mod canvas;
mod dialogs;
mod run;
mod toolbar;

pub use run::run;

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;

use crate::notify::{NoticeLevel, Notices};
use crate::raster::{RasterEvent, RasterSurface};
use crate::report::Report;
use crate::session::Session;
use crate::touch::TouchTracker;
use crate::viewport::WheelZoom;

pub use dialogs::{DistanceDialog, ManualScaleDialog};

/// Top-level application state.
pub struct MapMeasureApp {
    pub(crate) session: Session,
    pub(crate) notices: Notices,
    pub(crate) touch: TouchTracker,
    pub(crate) wheel: WheelZoom,

    raster_tx: Sender<RasterEvent>,
    raster_rx: Receiver<RasterEvent>,
    pub(crate) decode_in_flight: bool,

    pub(crate) map_texture: Option<egui::TextureHandle>,
    pub(crate) map_size: Option<(u32, u32)>,
    pub(crate) source_file: Option<String>,

    pub(crate) distance_dialog: Option<DistanceDialog>,
    pub(crate) manual_dialog: Option<ManualScaleDialog>,
    pub(crate) report: Option<Report>,

    /// Latest canvas capture, tagged with the finish generation it belongs to.
    pub(crate) snapshot: Option<(u64, Arc<egui::ColorImage>)>,
    /// Generation awaiting an `Event::Screenshot` readback.
    pub(crate) screenshot_pending: Option<u64>,

    pub(crate) dragged_vertex: Option<usize>,
}

impl Default for MapMeasureApp {
    fn default() -> Self {
        let (raster_tx, raster_rx) = channel();
        Self {
            session: Session::new(),
            notices: Notices::default(),
            touch: TouchTracker::new(),
            wheel: WheelZoom::default(),
            raster_tx,
            raster_rx,
            decode_in_flight: false,
            map_texture: None,
            map_size: None,
            source_file: None,
            distance_dialog: None,
            manual_dialog: None,
            report: None,
            snapshot: None,
            screenshot_pending: None,
            dragged_vertex: None,
        }
    }
}

impl MapMeasureApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn map_loaded(&self) -> bool {
        self.map_texture.is_some()
    }

    pub(crate) fn raster_sender(&self) -> Sender<RasterEvent> {
        self.raster_tx.clone()
    }

    /// Apply any finished decode. Only the success arm resets state; a
    /// failed load leaves the previous map (if any) active.
    fn poll_raster_events(&mut self, ctx: &egui::Context, now_ms: f64) {
        while let Ok(event) = self.raster_rx.try_recv() {
            self.decode_in_flight = false;
            match event {
                RasterEvent::Ready(RasterSurface {
                    image,
                    width,
                    height,
                    file_name,
                }) => {
                    let texture = ctx.load_texture(
                        "map",
                        egui::ImageData::Color(Arc::new(image)),
                        egui::TextureOptions::LINEAR,
                    );
                    self.map_texture = Some(texture);
                    self.map_size = Some((width, height));
                    self.session.reset_for_new_image();
                    self.touch.reset();
                    self.report = None;
                    self.snapshot = None;
                    self.screenshot_pending = None;
                    self.dragged_vertex = None;
                    self.notices
                        .success(format!("Loaded {file_name} ({width}×{height})"), now_ms);
                    self.source_file = Some(file_name);
                }
                RasterEvent::Failed { file_name, reason } => {
                    self.notices
                        .error(format!("Could not load {file_name}: {reason}"), now_ms);
                }
            }
        }
    }

    /// Request the deferred post-finish capture and pick up the readback.
    ///
    /// The request is sent at the end of the frame in which the closed
    /// polygon painted, so the capture always includes the closing edge. A
    /// capture tagged with an outdated generation is dropped (a newer finish
    /// or clear superseded it).
    fn handle_snapshot(&mut self, ctx: &egui::Context) {
        if let Some(generation) = self.session.take_due_snapshot() {
            self.screenshot_pending = Some(generation);
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
        if let Some(image_arc) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        }) {
            if let Some(generation) = self.screenshot_pending.take() {
                if generation == self.session.snapshot_generation() {
                    self.snapshot = Some((generation, image_arc));
                }
            }
        }
    }

    /// Paint pending notices as transient toasts in the bottom-right corner.
    fn paint_notices(&mut self, ctx: &egui::Context, now_ms: f64) {
        self.notices.expire(now_ms);
        if self.notices.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for notice in self.notices.iter() {
                    let color = match notice.level {
                        NoticeLevel::Success => egui::Color32::from_rgb(60, 160, 60),
                        NoticeLevel::Warning => egui::Color32::from_rgb(200, 150, 30),
                        NoticeLevel::Error => egui::Color32::from_rgb(200, 60, 60),
                    };
                    egui::Frame::popup(ui.style()).fill(color).show(ui, |ui| {
                        ui.colored_label(egui::Color32::WHITE, &notice.text);
                    });
                }
            });
        // Keep repainting so expiry happens without further input.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for MapMeasureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;

        self.poll_raster_events(ctx, now_ms);
        self.show_toolbar(ctx, now_ms);
        self.show_canvas(ctx, now_ms);
        self.show_dialogs(ctx, now_ms);

        if let Some(mut report) = self.report.take() {
            if report.show(ctx) {
                self.report = Some(report);
            }
        }

        self.handle_snapshot(ctx);
        self.paint_notices(ctx, now_ms);
    }
}
