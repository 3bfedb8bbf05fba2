//! Sample axes for parameter sweeps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative slack used to decide whether `end` is reached by a whole
/// number of steps.
const STEP_EPSILON: f64 = 1e-9;

/// Errors raised while expanding a sample axis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("range bounds must be finite (start {start}, end {end})")]
    NonFinite { start: f64, end: f64 },

    #[error("range step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("range end {end} is below start {start}")]
    Reversed { start: f64, end: f64 },

    #[error("range yields {count} samples, limit is {max}")]
    TooManySamples { count: usize, max: usize },
}

/// Evenly spaced samples `start, start + step, ...` up to and including `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SampleRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Number of samples the range expands to.
    ///
    /// Spans too wide to count in a `usize` report `usize::MAX`, which any
    /// sample limit then rejects.
    pub fn count(&self) -> Result<usize, RangeError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(RangeError::NonFinite {
                start: self.start,
                end: self.end,
            });
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(RangeError::InvalidStep(self.step));
        }
        if self.end < self.start {
            return Err(RangeError::Reversed {
                start: self.start,
                end: self.end,
            });
        }
        let steps = ((self.end - self.start) / self.step + STEP_EPSILON).floor();
        // Float-to-int casts saturate, including for an infinite span
        Ok((steps as usize).saturating_add(1))
    }

    /// Expands the range, refusing to produce more than `max` samples.
    ///
    /// Each sample is computed as `start + k * step` so error does not
    /// accumulate along the axis.
    pub fn values(&self, max: usize) -> Result<Vec<f64>, RangeError> {
        let count = self.count()?;
        if count > max {
            return Err(RangeError::TooManySamples { count, max });
        }
        Ok((0..count)
            .map(|k| self.start + k as f64 * self.step)
            .collect())
    }
}

/// One sweep axis: either explicit values or a generated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleAxis {
    List(Vec<f64>),
    Range(SampleRange),
}

impl SampleAxis {
    /// Resolves the axis into concrete sample values.
    pub fn values(&self, max: usize) -> Result<Vec<f64>, RangeError> {
        match self {
            SampleAxis::List(values) if values.len() > max => Err(RangeError::TooManySamples {
                count: values.len(),
                max,
            }),
            SampleAxis::List(values) => Ok(values.clone()),
            SampleAxis::Range(range) => range.values(max),
        }
    }
}

impl From<Vec<f64>> for SampleAxis {
    fn from(values: Vec<f64>) -> Self {
        SampleAxis::List(values)
    }
}

impl From<SampleRange> for SampleAxis {
    fn from(range: SampleRange) -> Self {
        SampleAxis::Range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_includes_end() {
        let values = SampleRange::new(1.0, 3.0, 0.5).values(100).unwrap();
        assert_eq!(values, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_range_stops_before_partial_step() {
        let values = SampleRange::new(0.0, 1.0, 0.3).values(100).unwrap();
        assert_eq!(values.len(), 4);
        assert!((values[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_step_reaches_end() {
        // 0.1 steps accumulate rounding error; end must still be included
        let values = SampleRange::new(0.0, 1.0, 0.1).values(100).unwrap();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_single_point_range() {
        assert_eq!(SampleRange::new(2.0, 2.0, 1.0).values(10).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            SampleRange::new(0.0, 1.0, 0.0).count(),
            Err(RangeError::InvalidStep(0.0))
        );
        assert!(matches!(
            SampleRange::new(5.0, 1.0, 1.0).count(),
            Err(RangeError::Reversed { .. })
        ));
        assert!(matches!(
            SampleRange::new(0.0, f64::INFINITY, 1.0).count(),
            Err(RangeError::NonFinite { .. })
        ));
        assert_eq!(
            SampleRange::new(0.0, 99.0, 1.0).values(50),
            Err(RangeError::TooManySamples { count: 100, max: 50 })
        );
    }

    #[test]
    fn test_huge_range_rejected() {
        let range = SampleRange::new(0.0, 1e20, 1.0);
        assert_eq!(range.count(), Ok(usize::MAX));
        assert_eq!(
            range.values(10_000),
            Err(RangeError::TooManySamples {
                count: usize::MAX,
                max: 10_000
            })
        );
    }

    #[test]
    fn test_infinite_span_rejected() {
        // Both bounds are finite but end - start overflows to infinity
        let range = SampleRange::new(-1e308, 1e308, 1.0);
        assert_eq!(range.count(), Ok(usize::MAX));
        assert!(matches!(
            range.values(10_000),
            Err(RangeError::TooManySamples { max: 10_000, .. })
        ));
        assert!(matches!(
            SampleAxis::from(range).values(usize::MAX - 1),
            Err(RangeError::TooManySamples { .. })
        ));
    }

    #[test]
    fn test_axis_from_toml() {
        #[derive(Deserialize)]
        struct Axes {
            list: SampleAxis,
            range: SampleAxis,
        }

        let axes: Axes = toml::from_str(
            "list = [1.0, 2.0]\nrange = { start = 1.0, end = 2.0, step = 0.5 }",
        )
        .unwrap();

        assert_eq!(axes.list.values(10).unwrap(), vec![1.0, 2.0]);
        assert_eq!(axes.range.values(10).unwrap(), vec![1.0, 1.5, 2.0]);
        assert!(axes.list.values(1).is_err());
    }
}
