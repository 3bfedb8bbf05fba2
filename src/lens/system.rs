//! Lens specifications and system validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single idealized thin lens.
///
/// Positive focal lengths converge, negative focal lengths diverge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensSpec {
    /// Focal length in cm.
    pub focal_length: f64,
}

impl LensSpec {
    pub fn new(focal_length: f64) -> Self {
        Self { focal_length }
    }

    /// Returns true for a converging lens.
    #[inline]
    pub fn is_converging(&self) -> bool {
        self.focal_length > 0.0
    }
}

impl From<f64> for LensSpec {
    fn from(focal_length: f64) -> Self {
        Self::new(focal_length)
    }
}

/// A lens arrangement that cannot be propagated.
///
/// Raised before any stage is evaluated, so a partial trace is never
/// produced alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfiguration {
    #[error("lens system has no lenses")]
    NoLenses,

    #[error("{lenses} lenses need at least {expected} gaps, got {got}")]
    MissingGaps {
        lenses: usize,
        expected: usize,
        got: usize,
    },

    #[error("lens {index} has zero focal length")]
    ZeroFocalLength { index: usize },
}

/// An ordered, validated sequence of thin lenses.
///
/// Order defines the optical path. Validation happens once on
/// construction; the system can then be propagated any number of times
/// with different object heights and gap sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct LensSystem {
    lenses: Vec<LensSpec>,
}

impl LensSystem {
    /// Validates and wraps a lens sequence.
    pub fn new(lenses: Vec<LensSpec>) -> Result<Self, InvalidConfiguration> {
        if lenses.is_empty() {
            return Err(InvalidConfiguration::NoLenses);
        }
        if let Some(pos) = lenses.iter().position(|l| l.focal_length == 0.0) {
            return Err(InvalidConfiguration::ZeroFocalLength { index: pos + 1 });
        }
        Ok(Self { lenses })
    }

    /// Builds a system from bare focal lengths.
    pub fn from_focal_lengths(focal_lengths: &[f64]) -> Result<Self, InvalidConfiguration> {
        Self::new(focal_lengths.iter().copied().map(LensSpec::new).collect())
    }

    #[inline]
    pub fn lenses(&self) -> &[LensSpec] {
        &self.lenses
    }

    /// Number of lenses (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    /// Always false for a constructed system.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    /// Number of gap entries a propagation needs: the object distance
    /// plus one gap after every lens except the last. The gap after the
    /// last lens is implicitly zero and may be omitted.
    #[inline]
    pub fn required_gaps(&self) -> usize {
        self.lenses.len()
    }

    /// Checks a gap sequence against this system.
    ///
    /// Gaps beyond the one following the last lens are accepted and ignored.
    pub fn check_gaps(&self, gaps: &[f64]) -> Result<(), InvalidConfiguration> {
        if gaps.len() < self.required_gaps() {
            return Err(InvalidConfiguration::MissingGaps {
                lenses: self.len(),
                expected: self.required_gaps(),
                got: gaps.len(),
            });
        }
        Ok(())
    }

    /// Builds the gap sequence `[distance, gap, gap, ..., gap]` used by
    /// uniform-spacing sweeps.
    pub fn uniform_gaps(&self, distance: f64, gap: f64) -> Vec<f64> {
        std::iter::once(distance)
            .chain(std::iter::repeat(gap).take(self.len()))
            .collect()
    }
}
