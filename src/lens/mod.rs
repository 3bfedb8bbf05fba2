//! Thin-lens model.
//!
//! Pure paraxial formulas plus the validated lens-system type the
//! propagator runs on. Nothing in this module logs or holds state.

pub mod formulas;
mod system;

pub use formulas::{image_distance, image_height, magnification};
pub use system::{InvalidConfiguration, LensSpec, LensSystem};
