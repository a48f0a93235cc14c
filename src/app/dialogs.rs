//! Modal dialogs for real-distance confirmation and direct scale entry.
//!
//! Invalid input never mutates state: the dialog stays open, keeps the typed
//! value, and shows the reason inline.

use eframe::egui;

use super::MapMeasureApp;

/// Modal asking what real-world distance the drawn line represents.
#[derive(Debug, Default)]
pub struct DistanceDialog {
    pub input: String,
    pub error: Option<String>,
}

/// Modal for typing a pixels-per-foot value directly.
#[derive(Debug, Default)]
pub struct ManualScaleDialog {
    pub input: String,
    pub error: Option<String>,
}

fn parse_number(input: &str) -> Result<f64, String> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| "Enter a number".to_string())
}

impl MapMeasureApp {
    pub(crate) fn show_dialogs(&mut self, ctx: &egui::Context, now_ms: f64) {
        self.show_distance_dialog(ctx, now_ms);
        self.show_manual_dialog(ctx, now_ms);
    }

    fn show_distance_dialog(&mut self, ctx: &egui::Context, now_ms: f64) {
        let Some(mut dialog) = self.distance_dialog.take() else {
            return;
        };
        let mut keep_open = true;
        egui::Window::new("Reference distance")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Real-world length of the drawn line (feet):");
                let edit = ui.text_edit_singleline(&mut dialog.input);
                edit.request_focus();
                if let Some(error) = &dialog.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }
                ui.horizontal(|ui| {
                    let submitted = ui.button("Confirm").clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if submitted {
                        let outcome = parse_number(&dialog.input)
                            .and_then(|v| self.session.confirm_calibration_distance(v));
                        match outcome {
                            Ok(scale) => {
                                self.notices.success(
                                    format!("Scale set: {scale:.3} px/ft"),
                                    now_ms,
                                );
                                keep_open = false;
                            }
                            Err(msg) => dialog.error = Some(msg),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        // Line stays drawn; the user can still confirm,
                        // redraw, or cancel from the toolbar.
                        keep_open = false;
                    }
                });
            });
        if keep_open {
            self.distance_dialog = Some(dialog);
        }
    }

    fn show_manual_dialog(&mut self, ctx: &egui::Context, now_ms: f64) {
        let Some(mut dialog) = self.manual_dialog.take() else {
            return;
        };
        let mut keep_open = true;
        egui::Window::new("Enter scale")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Map pixels per foot:");
                let edit = ui.text_edit_singleline(&mut dialog.input);
                edit.request_focus();
                if let Some(error) = &dialog.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }
                ui.horizontal(|ui| {
                    let submitted = ui.button("Apply").clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if submitted {
                        let outcome = parse_number(&dialog.input)
                            .and_then(|v| self.session.apply_manual_scale(v));
                        match outcome {
                            Ok(scale) => {
                                self.notices.success(
                                    format!("Scale set: {scale:.3} px/ft"),
                                    now_ms,
                                );
                                keep_open = false;
                            }
                            Err(msg) => dialog.error = Some(msg),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.session.cancel_to_idle();
                        keep_open = false;
                    }
                });
            });
        if keep_open {
            self.manual_dialog = Some(dialog);
        }
    }
}
