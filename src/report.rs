//! Measurement report: a static window showing the finished plot's numbers
//! alongside the captured canvas snapshot, plus PNG export of the snapshot.

use std::path::Path;
use std::sync::Arc;

use eframe::egui;
use image::{Rgba, RgbaImage};

use crate::session::Results;

/// Everything the report window needs, frozen at finish time.
pub struct Report {
    pub results: Results,
    pub source_file: String,
    pub generated: chrono::DateTime<chrono::Local>,
    pub snapshot: Option<Arc<egui::ColorImage>>,
    texture: Option<egui::TextureHandle>,
}

impl Report {
    pub fn new(
        results: Results,
        source_file: String,
        snapshot: Option<Arc<egui::ColorImage>>,
    ) -> Self {
        Self {
            results,
            source_file,
            generated: chrono::Local::now(),
            snapshot,
            texture: None,
        }
    }

    /// Render the report window. Returns `false` once the user closes it.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;
        egui::Window::new("Measurement report")
            .open(&mut open)
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(format!("Source: {}", self.source_file));
                ui.label(format!(
                    "Generated: {}",
                    self.generated.format("%Y-%m-%d %H:%M")
                ));
                ui.separator();

                egui::Grid::new("report_area_grid").show(ui, |ui| {
                    ui.label("Area (sq ft)");
                    ui.label(format!("{:.2}", self.results.area.sq_ft));
                    ui.end_row();
                    ui.label("Area (shotok)");
                    ui.label(format!("{:.4}", self.results.area.shotok));
                    ui.end_row();
                    ui.label("Area (katha)");
                    ui.label(format!("{:.4}", self.results.area.katha));
                    ui.end_row();
                });
                ui.separator();

                ui.label("Side lengths (ft):");
                let count = self.results.side_lengths_ft.len();
                for (i, len) in self.results.side_lengths_ft.iter().enumerate() {
                    let label = if i + 1 == count {
                        format!("Closing edge: {len:.2}")
                    } else {
                        format!("Side {}: {len:.2}", i + 1)
                    };
                    ui.label(label);
                }

                if let Some(snapshot) = &self.snapshot {
                    ui.separator();
                    let texture = self.texture.get_or_insert_with(|| {
                        ctx.load_texture(
                            "report_snapshot",
                            egui::ImageData::Color(snapshot.clone()),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    let size = texture.size_vec2();
                    let max_w = ui.available_width().min(480.0);
                    let scaled = size * (max_w / size.x).min(1.0);
                    ui.image((texture.id(), scaled));

                    if ui.button("Save snapshot PNG…").clicked() {
                        let default_name = format!(
                            "plot_report_{}.png",
                            chrono::Local::now().format("%Y%m%d_%H%M%S")
                        );
                        if let Some(path) = rfd::FileDialog::new()
                            .set_file_name(&default_name)
                            .save_file()
                        {
                            if let Err(e) = save_snapshot_png(snapshot, &path) {
                                eprintln!("Failed to save report snapshot: {e}");
                            } else {
                                eprintln!("Saved report snapshot to {:?}", path);
                            }
                        }
                    }
                }
            });
        open
    }
}

/// Write an egui color image to disk as PNG.
pub fn save_snapshot_png(image: &egui::ColorImage, path: &Path) -> Result<(), String> {
    let [w, h] = image.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p = image.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out.save(path).map_err(|e| e.to_string())
}
