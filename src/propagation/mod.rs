//! Sequential propagation through a lens cascade.
//!
//! Turns a validated [`LensSystem`](crate::lens::LensSystem), an object
//! height and a gap sequence into a per-lens trace plus whole-system
//! aggregates. Propagation is a pure function: it does not log, print,
//! or touch shared state. Formatting lives in
//! [`presentation`](crate::presentation).

mod propagator;
mod stage;

pub use propagator::propagate;
pub use stage::{StageResult, SystemResult};
