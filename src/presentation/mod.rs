//! Presentation of propagation and sweep results.
//!
//! Everything here consumes the raw value objects produced by
//! [`propagation`](crate::propagation) and [`sweep`](crate::sweep) and
//! never feeds back into them. Each renderer picks its own saturation cap.

mod export;
mod heatmap;
mod saturation;
mod table;

pub use export::{save_grid_csv, write_grid_csv, ExportError};
pub use heatmap::{
    AnsiHeatmap, ColorScale, Heatmap, Rgb, DEFAULT_BANDS, SATURATED_COLOR, UNDEFINED_COLOR,
};
pub use saturation::{CellDisplay, SaturationCap};
pub use table::{GridTable, SystemReport, DEFAULT_DECIMALS};
