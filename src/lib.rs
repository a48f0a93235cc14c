//! MapMeasure crate root: re-exports and module wiring.
//!
//! Interactive tool for measuring land plots on an uploaded map: calibrate a
//! pixel-to-real-world scale, trace a closed polygon, and read its area and
//! side lengths in multiple units.
//!
//! The crate is split into a GUI-free interaction engine and an egui app:
//! - `geometry`, `units`: pure measurement math
//! - `viewport`, `touch`: coordinate transform, wheel zoom, pinch/tap gestures
//! - `calibration`, `plot`: the two interaction state machines
//! - `session`: the aggregate owning all interaction state
//! - `persistence`: JSON save/load of scale + vertices
//! - `raster`, `notify`, `report`: collaborators (map decode, toasts, report)
//! - `app`: the eframe application around the engine

pub mod app;
pub mod calibration;
pub mod geometry;
pub mod notify;
pub mod persistence;
pub mod plot;
pub mod raster;
pub mod report;
pub mod session;
pub mod touch;
pub mod units;
pub mod viewport;

// Public re-exports for a compact external API
pub use app::{run, MapMeasureApp};
pub use calibration::{Calibration, CalibrationLine};
pub use geometry::{closing_proximity, shoelace_area, side_lengths, Point};
pub use persistence::SavedPlot;
pub use plot::PlotState;
pub use session::{Mode, Results, Session};
pub use touch::{TouchOutcome, TouchTracker};
pub use units::AreaBreakdown;
pub use viewport::{ViewportState, WheelZoom};
