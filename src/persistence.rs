//! Plot persistence: save and load the scale plus vertex list as JSON.
//!
//! The wire format is `{ "scale": float|null, "plotPoints": [{"x","y"}, …] }`.
//! Loading validates the full shape before anything is applied, so a rejected
//! file never leaves partial state behind.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::Point;

/// Serializable plot payload (the exchanged file format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlot {
    pub scale: Option<f64>,
    #[serde(rename = "plotPoints")]
    pub plot_points: Vec<Point>,
}

/// Serialize a plot as pretty JSON.
pub fn to_json(plot: &SavedPlot) -> Result<String, String> {
    serde_json::to_string_pretty(plot).map_err(|e| e.to_string())
}

/// Parse and validate a plot file.
///
/// Validation is explicit against the JSON value rather than a blind
/// deserialize so each rejection carries the specific reason.
pub fn from_json(json: &str) -> Result<SavedPlot, String> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| format!("not valid JSON: {e}"))?;
    let obj = value
        .as_object()
        .ok_or_else(|| "save file must be a JSON object".to_string())?;

    let points_value = obj
        .get("plotPoints")
        .ok_or_else(|| "missing \"plotPoints\"".to_string())?;
    let points_array = points_value
        .as_array()
        .ok_or_else(|| "\"plotPoints\" must be an array".to_string())?;

    let mut plot_points = Vec::with_capacity(points_array.len());
    for (i, entry) in points_array.iter().enumerate() {
        let x = entry.get("x").and_then(Value::as_f64);
        let y = entry.get("y").and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => plot_points.push(Point::new(x, y)),
            _ => {
                return Err(format!(
                    "plotPoints[{i}] must have numeric \"x\" and \"y\""
                ))
            }
        }
    }

    let scale = match obj.get("scale") {
        None | Some(Value::Null) => None,
        Some(v) => {
            let s = v
                .as_f64()
                .ok_or_else(|| "\"scale\" must be a number".to_string())?;
            if !(s.is_finite() && s > 0.0) {
                return Err("\"scale\" must be a positive number".to_string());
            }
            Some(s)
        }
    };

    Ok(SavedPlot { scale, plot_points })
}

/// Save a plot to a JSON file at the given path.
pub fn save_to_path(plot: &SavedPlot, path: &Path) -> Result<(), String> {
    let txt = to_json(plot)?;
    std::fs::write(path, txt).map_err(|e| e.to_string())
}

/// Load and validate a plot from a JSON file at the given path.
pub fn load_from_path(path: &Path) -> Result<SavedPlot, String> {
    let txt = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    from_json(&txt)
}
