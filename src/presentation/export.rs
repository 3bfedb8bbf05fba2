//! CSV export of sweep grids.

use crate::sweep::MagnificationGrid;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the raw grid as CSV: a `distance` column followed by one column
/// per gap value. Infinities are written as `inf` / `-inf`.
pub fn write_grid_csv<W: io::Write>(grid: &MagnificationGrid, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let header = std::iter::once("distance".to_string())
        .chain(grid.gaps().iter().map(|g| format!("gap={g}")));
    wtr.write_record(header)?;

    for (r, d) in grid.distances().iter().enumerate() {
        let row = grid.row(r).unwrap_or_default();
        let record = std::iter::once(d.to_string()).chain(row.iter().map(|v| v.to_string()));
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the grid to a CSV file.
pub fn save_grid_csv(grid: &MagnificationGrid, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_grid_csv(grid, file)?;
    tracing::info!(path = %path.as_ref().display(), "Grid written");
    Ok(())
}
