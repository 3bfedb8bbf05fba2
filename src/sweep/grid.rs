//! Raw magnification surface produced by a sweep.

use serde::Serialize;

/// Total magnification over `(initial distance, uniform gap)` samples.
///
/// Rows follow the distance axis and columns the gap axis, both in the
/// order the caller supplied. Values are raw: infinities produced by
/// degenerate stages are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnificationGrid {
    distances: Vec<f64>,
    gaps: Vec<f64>,
    /// Row-major, `distances.len() * gaps.len()` entries.
    values: Vec<f64>,
}

impl MagnificationGrid {
    pub(crate) fn new(distances: Vec<f64>, gaps: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), distances.len() * gaps.len());
        Self {
            distances,
            gaps,
            values,
        }
    }

    /// Row axis: initial object distances.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Column axis: uniform inter-lens gaps.
    pub fn gaps(&self) -> &[f64] {
        &self.gaps
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.gaps.len()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.values[row * self.cols() + col])
    }

    /// One distance row across every gap.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows() {
            return None;
        }
        let cols = self.cols();
        Some(&self.values[row * cols..(row + 1) * cols])
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates `(distance, gap, magnification)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.distances.iter().enumerate().flat_map(move |(r, &d)| {
            self.gaps
                .iter()
                .enumerate()
                .map(move |(c, &g)| (d, g, self.values[r * self.gaps.len() + c]))
        })
    }

    /// Smallest and largest finite values, ignoring infinities and NaN.
    pub fn extremes(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Copies the surface into nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .filter_map(|r| self.row(r).map(<[f64]>::to_vec))
            .collect()
    }
}
