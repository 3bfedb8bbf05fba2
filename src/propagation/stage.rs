//! Per-stage trace records and whole-system results.

use crate::lens::formulas;
use serde::Serialize;

/// What happened at one lens of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageResult {
    /// Lens index, 1-based.
    pub index: usize,
    /// Focal length of this lens.
    pub focal_length: f64,
    /// Object distance seen by this lens.
    pub object_distance: f64,
    /// Image distance produced by this lens.
    pub image_distance: f64,
    /// Magnification of this stage alone.
    pub magnification: f64,
    /// Product of all stage magnifications up to and including this one.
    pub cumulative_magnification: f64,
    /// Object height times the cumulative magnification.
    pub cumulative_image_height: f64,
}

impl StageResult {
    /// Returns true if this stage hit the focal-point or on-lens guard.
    pub fn is_degenerate(&self) -> bool {
        formulas::is_degenerate(self.focal_length, self.object_distance)
    }

    /// Returns true if the image forms before the lens (virtual image).
    pub fn is_virtual_image(&self) -> bool {
        self.image_distance < 0.0
    }
}

/// Trace and aggregates of one propagation call.
///
/// A fresh value per call; nothing is cached or shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemResult {
    stages: Vec<StageResult>,
}

impl SystemResult {
    /// Wraps a non-empty stage trace.
    pub(crate) fn new(stages: Vec<StageResult>) -> Self {
        debug_assert!(!stages.is_empty());
        Self { stages }
    }

    /// Ordered per-lens trace.
    pub fn stages(&self) -> &[StageResult] {
        &self.stages
    }

    /// Stage by 1-based lens index.
    pub fn stage(&self, index: usize) -> Option<&StageResult> {
        index.checked_sub(1).and_then(|i| self.stages.get(i))
    }

    fn last(&self) -> &StageResult {
        // Construction guarantees at least one stage
        &self.stages[self.stages.len() - 1]
    }

    /// Product of every stage magnification.
    pub fn total_magnification(&self) -> f64 {
        self.last().cumulative_magnification
    }

    /// Image distance of the last lens.
    pub fn final_image_position(&self) -> f64 {
        self.last().image_distance
    }

    /// Image height after the last lens.
    pub fn final_image_height(&self) -> f64 {
        self.last().cumulative_image_height
    }

    /// Number of stages that hit a degenerate guard.
    pub fn degenerate_stages(&self) -> usize {
        self.stages.iter().filter(|s| s.is_degenerate()).count()
    }
}

impl<'a> IntoIterator for &'a SystemResult {
    type Item = &'a StageResult;
    type IntoIter = std::slice::Iter<'a, StageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}
