//! Plain-text tables for propagation traces and sweep grids.

use super::{CellDisplay, SaturationCap};
use crate::propagation::SystemResult;
use crate::sweep::MagnificationGrid;
use std::fmt;

/// Default number of decimals in printed values.
pub const DEFAULT_DECIMALS: usize = 2;

/// Stage-by-stage report of a single propagation.
pub struct SystemReport<'a> {
    result: &'a SystemResult,
    decimals: usize,
}

impl<'a> SystemReport<'a> {
    pub fn new(result: &'a SystemResult) -> Self {
        Self {
            result,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

impl fmt::Display for SystemReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decimals;
        for stage in self.result {
            writeln!(f, "Lens {}:", stage.index)?;
            writeln!(f, "  Focal length (f): {:.*} cm", d, stage.focal_length)?;
            writeln!(f, "  Object distance (p): {:.*} cm", d, stage.object_distance)?;
            writeln!(f, "  Image distance (q): {:.*} cm", d, stage.image_distance)?;
            writeln!(f, "  Magnification (M): {:.*}", d, stage.magnification)?;
            writeln!(f, "  Image height (hi): {:.*} cm", d, stage.cumulative_image_height)?;
            if stage.is_degenerate() {
                writeln!(f, "  (degenerate conjugate)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Final Results:")?;
        writeln!(
            f,
            "  Total Magnification (M_total): {:.*}",
            d,
            self.result.total_magnification()
        )?;
        writeln!(
            f,
            "  Final Image Position (q_final): {:.*} cm",
            d,
            self.result.final_image_position()
        )?;
        write!(
            f,
            "  Final Image Height (hi_final): {:.*} cm",
            d,
            self.result.final_image_height()
        )
    }
}

/// Distance × gap table of a sweep with saturated cells marked.
pub struct GridTable<'a> {
    grid: &'a MagnificationGrid,
    cap: SaturationCap,
    decimals: usize,
}

impl<'a> GridTable<'a> {
    pub fn new(grid: &'a MagnificationGrid) -> Self {
        Self {
            grid,
            cap: SaturationCap::default(),
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_cap(mut self, cap: SaturationCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    fn cell(&self, value: f64) -> String {
        match self.cap.classify(value) {
            CellDisplay::Value(v) => format!("{:.*}", self.decimals, v),
            CellDisplay::Saturated { positive: true } => "∞".to_string(),
            CellDisplay::Saturated { positive: false } => "-∞".to_string(),
            CellDisplay::Undefined => "NaN".to_string(),
        }
    }
}

impl fmt::Display for GridTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self
            .grid
            .gaps()
            .iter()
            .map(|g| format!("{:.*}", self.decimals, g))
            .collect();
        let labels: Vec<String> = self
            .grid
            .distances()
            .iter()
            .map(|d| format!("{:.*}", self.decimals, d))
            .collect();
        let body: Vec<Vec<String>> = (0..self.grid.rows())
            .map(|r| {
                self.grid
                    .row(r)
                    .unwrap_or_default()
                    .iter()
                    .map(|&v| self.cell(v))
                    .collect()
            })
            .collect();

        let corner = "d \\ g";
        let label_width = labels
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(corner.len()))
            .max()
            .unwrap_or(0);
        let cell_width = header
            .iter()
            .chain(body.iter().flatten())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);

        write!(f, "{:>label_width$}", corner)?;
        for h in &header {
            write!(f, "  {:>cell_width$}", h)?;
        }
        for (label, row) in labels.iter().zip(&body) {
            writeln!(f)?;
            write!(f, "{:>label_width$}", label)?;
            for cell in row {
                write!(f, "  {:>cell_width$}", cell)?;
            }
        }
        Ok(())
    }
}
