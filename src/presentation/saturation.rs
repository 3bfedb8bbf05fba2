//! Display-time capping of magnification values.
//!
//! Sweeps near `p == f` produce enormous or infinite gains that drown out
//! the rest of a table or colour scale. A cap classifies each raw value
//! for display only; the underlying grid is never modified.

use serde::{Deserialize, Serialize};

/// How one raw value should be rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellDisplay {
    /// Ordinary value below the cap.
    Value(f64),
    /// At or beyond the cap, or infinite. Keeps the sign.
    Saturated { positive: bool },
    /// NaN, e.g. zero height times infinite magnification.
    Undefined,
}

impl CellDisplay {
    pub fn is_saturated(&self) -> bool {
        matches!(self, CellDisplay::Saturated { .. })
    }
}

/// Magnitude at which a value is shown as saturated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationCap {
    /// Values with `|M| >= threshold` are saturated.
    pub threshold: f64,
}

impl Default for SaturationCap {
    fn default() -> Self {
        Self { threshold: 1000.0 }
    }
}

impl SaturationCap {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Cap that only saturates true infinities.
    pub fn unbounded() -> Self {
        Self {
            threshold: f64::INFINITY,
        }
    }

    /// Classifies a raw value.
    pub fn classify(&self, value: f64) -> CellDisplay {
        if value.is_nan() {
            CellDisplay::Undefined
        } else if value.is_infinite() || value.abs() >= self.threshold {
            CellDisplay::Saturated {
                positive: value > 0.0,
            }
        } else {
            CellDisplay::Value(value)
        }
    }

    /// Counts how many values the cap would saturate.
    pub fn count_saturated(&self, values: &[f64]) -> usize {
        values
            .iter()
            .filter(|&&v| self.classify(v).is_saturated())
            .count()
    }
}
