//! Top toolbar: mode switching, plot actions, save/load, and report access,
//! with every precondition guard surfaced as a notice.

use eframe::egui;
use egui_phosphor::regular as icons;

use crate::persistence;
use crate::raster;
use crate::report::Report;
use crate::session::Mode;

use super::{DistanceDialog, ManualScaleDialog, MapMeasureApp};

impl MapMeasureApp {
    pub(crate) fn show_toolbar(&mut self, ctx: &egui::Context, now_ms: f64) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                self.file_buttons(ui, now_ms);
                ui.separator();
                self.scale_buttons(ui, now_ms);
                ui.separator();
                self.plot_buttons(ui, now_ms);
                ui.separator();
                self.status_labels(ui);
            });
        });
    }

    fn file_buttons(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        if ui
            .button(format!("{} Open map…", icons::FOLDER_OPEN))
            .on_hover_text("Load a map image (or a PDF page with the pdf feature)")
            .clicked()
        {
            let mut dialog = rfd::FileDialog::new().add_filter("Images", raster::IMAGE_EXTENSIONS);
            if cfg!(feature = "pdf") {
                dialog = dialog.add_filter("PDF", &["pdf"]);
            }
            if let Some(path) = dialog.pick_file() {
                self.decode_in_flight = true;
                raster::spawn_decode(path, self.raster_sender());
            }
        }
        if self.decode_in_flight {
            ui.spinner();
        }

        if ui
            .button(format!("{} Save plot…", icons::FLOPPY_DISK))
            .clicked()
        {
            match self.session.save_payload() {
                Ok(payload) => {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .set_file_name("plot.json")
                        .save_file()
                    {
                        match persistence::save_to_path(&payload, &path) {
                            Ok(()) => self.notices.success("Plot saved", now_ms),
                            Err(e) => self
                                .notices
                                .error(format!("Could not save plot: {e}"), now_ms),
                        }
                    }
                }
                Err(msg) => self.notices.warning(msg, now_ms),
            }
        }

        if ui
            .button(format!("{} Load plot…", icons::FOLDER_NOTCH_OPEN))
            .clicked()
        {
            if !self.map_loaded() {
                self.notices.warning("Upload a map first", now_ms);
            } else if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match persistence::load_from_path(&path) {
                    Ok(saved) => {
                        self.session.apply_saved(saved);
                        self.notices
                            .success("Plot loaded; press Finish to measure", now_ms);
                    }
                    Err(reason) => self
                        .notices
                        .error(format!("Could not load plot: {reason}"), now_ms),
                }
            }
        }
    }

    fn scale_buttons(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        let calibrating = self.session.mode() == Mode::Calibrating;
        if ui
            .selectable_label(calibrating, format!("{} Calibrate", icons::RULER))
            .on_hover_text("Draw a reference line of known length")
            .clicked()
        {
            if !self.map_loaded() {
                self.notices.warning("Upload a map first", now_ms);
            } else {
                self.session.start_calibration();
            }
        }

        if ui
            .button(format!("{} Enter scale…", icons::PENCIL_SIMPLE))
            .on_hover_text("Type a pixels-per-foot value directly")
            .clicked()
        {
            if !self.map_loaded() {
                self.notices.warning("Upload a map first", now_ms);
            } else {
                self.session.start_manual_scale_entry();
                self.manual_dialog = Some(ManualScaleDialog::default());
            }
        }

        // Pending-line controls appear once both endpoints are fixed.
        if calibrating && self.session.calibration.line().is_drawn() {
            if ui.button(format!("{} Confirm", icons::CHECK)).clicked() {
                self.distance_dialog = Some(DistanceDialog::default());
            }
            if ui
                .button(format!("{} Redraw", icons::ARROW_COUNTER_CLOCKWISE))
                .on_hover_text("Keep the first point, place the second again")
                .clicked()
            {
                self.session.calibration.undo_second_point();
            }
            if ui.button(format!("{} Cancel", icons::X)).clicked() {
                self.session.cancel_calibration();
            }
        }
    }

    fn plot_buttons(&mut self, ui: &mut egui::Ui, now_ms: f64) {
        let drawing = self.session.mode() == Mode::DrawingPolygon;
        if ui
            .selectable_label(drawing, format!("{} Draw plot", icons::POLYGON))
            .clicked()
        {
            if !self.map_loaded() {
                self.notices.warning("Upload a map first", now_ms);
            } else if let Err(msg) = self.session.start_drawing() {
                self.notices.warning(msg, now_ms);
            }
        }

        if drawing {
            if ui
                .button(format!("{} Undo", icons::ARROW_U_UP_LEFT))
                .clicked()
            {
                self.session.undo_vertex();
            }
            if ui.button(format!("{} Clear", icons::ERASER)).clicked() {
                self.session.clear_plot();
            }
            let can_finish = self.session.plot.vertex_count() >= 3
                && !self.session.plot.is_finished();
            if ui
                .add_enabled(
                    can_finish,
                    egui::Button::new(format!("{} Finish", icons::FLAG_CHECKERED)),
                )
                .clicked()
            {
                match self.session.finish_plot() {
                    Ok(results) => {
                        let sq_ft = results.area.sq_ft;
                        self.notices
                            .success(format!("Measured {sq_ft:.2} sq ft"), now_ms);
                    }
                    Err(msg) => self.notices.warning(msg, now_ms),
                }
            }
        }

        if ui
            .button(format!("{} Report", icons::FILE_TEXT))
            .clicked()
        {
            match self.session.results() {
                Some(results) => {
                    let snapshot = self
                        .snapshot
                        .as_ref()
                        .filter(|(gen, _)| *gen == self.session.snapshot_generation())
                        .map(|(_, image)| image.clone());
                    let source = self
                        .source_file
                        .clone()
                        .unwrap_or_else(|| "(unnamed map)".to_string());
                    self.report = Some(Report::new(results.clone(), source, snapshot));
                }
                None => self.notices.warning("Finish the plot first", now_ms),
            }
        }
    }

    fn status_labels(&self, ui: &mut egui::Ui) {
        match self.session.scale() {
            Some(scale) => ui.label(format!("Scale: {scale:.3} px/ft")),
            None => ui.label(egui::RichText::new("Uncalibrated").weak()),
        };
        if self.session.plot.vertex_count() > 0 {
            ui.label(format!(
                "{} vertices{}",
                self.session.plot.vertex_count(),
                if self.session.plot.is_finished() {
                    " (finished)"
                } else {
                    ""
                }
            ));
        }
    }
}
