//! Parameter-sweep analysis.
//!
//! Characterizes how total magnification varies with the initial object
//! distance and a uniform inter-lens gap. The analyzer returns raw values;
//! capping and colouring are left to [`presentation`](crate::presentation)
//! because different renderers apply different thresholds.

mod analyzer;
mod grid;
mod range;

pub use analyzer::{sweep, SweepAnalyzer, SweepError, DEFAULT_MAX_CELLS};
pub use grid::MagnificationGrid;
pub use range::{RangeError, SampleAxis, SampleRange};
