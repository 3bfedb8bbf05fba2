//! Colour-banded heatmaps of sweep grids.
//!
//! Magnitudes are compressed with `log10(1 + |M|)`, normalised against the
//! saturation threshold (or the largest finite magnitude when the cap is
//! unbounded), and quantised into a fixed number of bands sampled from a
//! `colorous` gradient. Saturated and undefined cells get fixed sentinel
//! colours outside the gradient.

use super::{CellDisplay, SaturationCap};
use crate::sweep::MagnificationGrid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of colour bands.
pub const DEFAULT_BANDS: usize = 8;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<colorous::Color> for Rgb {
    fn from(c: colorous::Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Colour used for saturated cells.
pub const SATURATED_COLOR: Rgb = Rgb {
    r: 255,
    g: 0,
    b: 255,
};

/// Colour used for NaN cells.
pub const UNDEFINED_COLOR: Rgb = Rgb {
    r: 96,
    g: 96,
    b: 96,
};

/// Sequential gradients available for heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    #[default]
    Viridis,
    Inferno,
    Magma,
    Plasma,
    Cividis,
    Turbo,
}

impl ColorScale {
    pub fn gradient(self) -> colorous::Gradient {
        match self {
            ColorScale::Viridis => colorous::VIRIDIS,
            ColorScale::Inferno => colorous::INFERNO,
            ColorScale::Magma => colorous::MAGMA,
            ColorScale::Plasma => colorous::PLASMA,
            ColorScale::Cividis => colorous::CIVIDIS,
            ColorScale::Turbo => colorous::TURBO,
        }
    }
}

impl std::str::FromStr for ColorScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(ColorScale::Viridis),
            "inferno" => Ok(ColorScale::Inferno),
            "magma" => Ok(ColorScale::Magma),
            "plasma" => Ok(ColorScale::Plasma),
            "cividis" => Ok(ColorScale::Cividis),
            "turbo" => Ok(ColorScale::Turbo),
            other => Err(format!("unknown colour scale: {other}")),
        }
    }
}

/// Maps grid cells to colour bands.
#[derive(Debug, Clone, Copy)]
pub struct Heatmap {
    cap: SaturationCap,
    scale: ColorScale,
    bands: usize,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            cap: SaturationCap::default(),
            scale: ColorScale::default(),
            bands: DEFAULT_BANDS,
        }
    }
}

impl Heatmap {
    pub fn new(cap: SaturationCap, scale: ColorScale, bands: usize) -> Self {
        Self {
            cap,
            scale,
            bands: bands.max(2),
        }
    }

    /// Magnitude that maps to the top band.
    fn ceiling(&self, grid: &MagnificationGrid) -> f64 {
        if self.cap.threshold.is_finite() {
            return self.cap.threshold;
        }
        grid.values()
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Band index of a displayable value against the given ceiling.
    pub fn band(&self, value: f64, ceiling: f64) -> usize {
        let top = (1.0 + ceiling.abs()).log10();
        if top <= 0.0 {
            return 0;
        }
        let t = ((1.0 + value.abs()).log10() / top).clamp(0.0, 1.0);
        ((t * self.bands as f64) as usize).min(self.bands - 1)
    }

    fn color_for(&self, value: f64, ceiling: f64) -> Rgb {
        match self.cap.classify(value) {
            CellDisplay::Value(v) => self
                .scale
                .gradient()
                .eval_rational(self.band(v, ceiling), self.bands)
                .into(),
            CellDisplay::Saturated { .. } => SATURATED_COLOR,
            CellDisplay::Undefined => UNDEFINED_COLOR,
        }
    }

    /// Colour of every cell, row by row.
    pub fn colors(&self, grid: &MagnificationGrid) -> Vec<Vec<Rgb>> {
        let ceiling = self.ceiling(grid);
        (0..grid.rows())
            .map(|r| {
                grid.row(r)
                    .unwrap_or_default()
                    .iter()
                    .map(|&v| self.color_for(v, ceiling))
                    .collect()
            })
            .collect()
    }

    /// Renders the grid as ANSI 24-bit background blocks with row labels
    /// and a band legend.
    pub fn render_ansi<'a>(&self, grid: &'a MagnificationGrid) -> AnsiHeatmap<'a> {
        AnsiHeatmap {
            heatmap: *self,
            grid,
        }
    }
}

/// Terminal rendering of a heatmap, produced by [`Heatmap::render_ansi`].
#[derive(Debug, Clone, Copy)]
pub struct AnsiHeatmap<'a> {
    heatmap: Heatmap,
    grid: &'a MagnificationGrid,
}

fn write_block(f: &mut fmt::Formatter<'_>, c: Rgb) -> fmt::Result {
    write!(f, "\x1b[48;2;{};{};{}m  ", c.r, c.g, c.b)
}

impl fmt::Display for AnsiHeatmap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heatmap = &self.heatmap;
        let colors = heatmap.colors(self.grid);
        let label_width = self
            .grid
            .distances()
            .iter()
            .map(|d| format!("{d:.2}").len())
            .max()
            .unwrap_or(0);

        for (d, row) in self.grid.distances().iter().zip(&colors) {
            write!(f, "{:>label_width$.2} ", d)?;
            for &c in row {
                write_block(f, c)?;
            }
            writeln!(f, "\x1b[0m")?;
        }

        f.write_str("legend: ")?;
        for band in 0..heatmap.bands {
            write_block(
                f,
                heatmap
                    .scale
                    .gradient()
                    .eval_rational(band, heatmap.bands)
                    .into(),
            )?;
        }
        f.write_str("\x1b[0m low→high  ")?;
        write_block(f, SATURATED_COLOR)?;
        write!(f, "\x1b[0m |M| ≥ {}", heatmap.cap.threshold)
    }
}
