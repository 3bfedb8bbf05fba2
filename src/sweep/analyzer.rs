//! Two-dimensional sensitivity sweeps.
//!
//! Evaluates total magnification for every `(initial distance, uniform
//! gap)` pair over a fixed lens sequence. Cells are independent, so the
//! parallel path is a plain rayon map over the flattened cross product;
//! each task writes only its own slot and results come back in row-major
//! order, identical to the sequential path.

use super::MagnificationGrid;
use crate::lens::{InvalidConfiguration, LensSystem};
use rayon::prelude::*;
use thiserror::Error;

/// Default upper bound on grid cells.
pub const DEFAULT_MAX_CELLS: usize = 1_000_000;

/// Errors that abort a sweep. No partial grid is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("invalid lens system: {0}")]
    System(#[from] InvalidConfiguration),

    #[error("propagation failed at distance {distance}, gap {gap}: {source}")]
    Cell {
        distance: f64,
        gap: f64,
        #[source]
        source: InvalidConfiguration,
    },

    #[error("sweep of {rows}x{cols} cells exceeds limit of {max}")]
    TooManyCells { rows: usize, cols: usize, max: usize },
}

/// Drives the propagator across a distance × gap grid.
#[derive(Debug, Clone)]
pub struct SweepAnalyzer {
    system: LensSystem,
    object_height: f64,
    parallel: bool,
    max_cells: usize,
}

impl SweepAnalyzer {
    /// Creates a sequential analyzer with the default cell limit.
    pub fn new(system: LensSystem, object_height: f64) -> Self {
        Self {
            system,
            object_height,
            parallel: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Enables or disables evaluating cells on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the maximum number of cells a single sweep may evaluate.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn system(&self) -> &LensSystem {
        &self.system
    }

    /// Total magnification for one `(distance, gap)` cell.
    pub fn evaluate(&self, distance: f64, gap: f64) -> Result<f64, SweepError> {
        let gaps = self.system.uniform_gaps(distance, gap);
        self.system
            .propagate(self.object_height, &gaps)
            .map(|result| result.total_magnification())
            .map_err(|source| SweepError::Cell {
                distance,
                gap,
                source,
            })
    }

    /// Runs the sweep over the cross product of `distances` and `gaps`.
    ///
    /// The first failing cell in row-major order aborts the whole sweep.
    pub fn run(&self, distances: &[f64], gaps: &[f64]) -> Result<MagnificationGrid, SweepError> {
        let rows = distances.len();
        let cols = gaps.len();
        if rows.saturating_mul(cols) > self.max_cells {
            return Err(SweepError::TooManyCells {
                rows,
                cols,
                max: self.max_cells,
            });
        }

        tracing::debug!(
            rows,
            cols,
            lenses = self.system.len(),
            parallel = self.parallel,
            "Starting magnification sweep"
        );

        let cells: Vec<(f64, f64)> = distances
            .iter()
            .flat_map(|&d| gaps.iter().map(move |&g| (d, g)))
            .collect();

        let evaluated: Vec<Result<f64, SweepError>> = if self.parallel {
            cells
                .into_par_iter()
                .map(|(d, g)| self.evaluate(d, g))
                .collect()
        } else {
            cells.into_iter().map(|(d, g)| self.evaluate(d, g)).collect()
        };

        let values = evaluated
            .into_iter()
            .collect::<Result<Vec<f64>, SweepError>>()
            .map_err(|e| {
                tracing::warn!(error = %e, "Sweep aborted");
                e
            })?;

        tracing::info!(cells = values.len(), "Magnification sweep complete");

        Ok(MagnificationGrid::new(
            distances.to_vec(),
            gaps.to_vec(),
            values,
        ))
    }
}

/// Validates the lens list and runs a sequential sweep in one call.
pub fn sweep(
    object_height: f64,
    focal_lengths: &[f64],
    distances: &[f64],
    gaps: &[f64],
) -> Result<MagnificationGrid, SweepError> {
    let system = LensSystem::from_focal_lengths(focal_lengths)?;
    SweepAnalyzer::new(system, object_height).run(distances, gaps)
}
