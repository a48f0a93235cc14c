//! Map acquisition: decode an image file (or, with the `pdf` feature, the
//! first page of a PDF) into an opaque raster surface.
//!
//! Decoding runs on a background thread and reports back over an mpsc
//! channel so a large file never blocks interaction handling. Success and
//! failure arrive as the same [`RasterEvent`] stream; only the success arm
//! resets application state, so a failed load leaves the previous map
//! active.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Upscale factor applied when rasterizing a PDF page.
#[cfg(feature = "pdf")]
pub const PDF_UPSCALE: f32 = 2.0;

/// Raster formats offered by the open-file dialog and accepted for decode.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp", "gif", "tiff"];

/// A decoded map raster with known pixel dimensions.
pub struct RasterSurface {
    pub image: egui::ColorImage,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
}

/// Outcome of one decode request.
pub enum RasterEvent {
    Ready(RasterSurface),
    Failed { file_name: String, reason: String },
}

/// Decode `path` on a background thread, delivering the result on `tx`.
pub fn spawn_decode(path: PathBuf, tx: Sender<RasterEvent>) {
    std::thread::spawn(move || {
        let event = decode(&path);
        // Receiver may be gone if the app shut down mid-decode.
        let _ = tx.send(event);
    });
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn decode(path: &Path) -> RasterEvent {
    let file_name = file_name_of(path);
    let is_pdf = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let result = if is_pdf {
        decode_pdf(path)
    } else {
        decode_image(path)
    };
    match result {
        Ok(surface) => RasterEvent::Ready(RasterSurface {
            file_name,
            ..surface
        }),
        Err(reason) => RasterEvent::Failed { file_name, reason },
    }
}

fn decode_image(path: &Path) -> Result<RasterSurface, String> {
    let decoded = image::open(path).map_err(|e| e.to_string())?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    );
    Ok(RasterSurface {
        image,
        width,
        height,
        file_name: String::new(),
    })
}

#[cfg(feature = "pdf")]
fn decode_pdf(path: &Path) -> Result<RasterSurface, String> {
    use pdfium_render::prelude::*;

    let pdfium = Pdfium::new(
        Pdfium::bind_to_system_library().map_err(|e| format!("pdfium unavailable: {e}"))?,
    );
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| e.to_string())?;
    let page = document
        .pages()
        .get(0)
        .map_err(|e| format!("PDF has no pages: {e}"))?;

    let target_width = (page.width().value * PDF_UPSCALE) as i32;
    let config = PdfRenderConfig::new().set_target_width(target_width);
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| e.to_string())?;
    let rgba = bitmap.as_image().to_rgba8();
    let (width, height) = rgba.dimensions();
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    );
    Ok(RasterSurface {
        image,
        width,
        height,
        file_name: String::new(),
    })
}

#[cfg(not(feature = "pdf"))]
fn decode_pdf(_path: &Path) -> Result<RasterSurface, String> {
    Err("built without PDF support (enable the `pdf` feature)".to_string())
}
