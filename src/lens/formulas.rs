//! Thin-lens arithmetic.
//!
//! The three paraxial relations used by every stage of a cascade:
//!
//! - lens equation: `1/f = 1/p + 1/q`
//! - lateral magnification: `M = -q/p`
//! - image height: `h_out = h_in * M`
//!
//! Two object positions are degenerate and handled by fixed guard
//! clauses rather than errors. An object at the focal point images at
//! positive infinity, and an object on the lens plane images on the lens.
//! The magnification guard for `p == 0` saturates to positive infinity.
//! These guards are compatibility approximations, not derived optics,
//! and callers must treat the infinities as sentinels.

/// Image distance `q` for a lens of focal length `f` and object distance `p`.
///
/// `f` must be non-zero; [`LensSystem`](super::LensSystem) enforces that
/// before any stage is evaluated.
///
/// Returns `f64::INFINITY` when `p == f` and `0.0` when `p == 0`.
/// Near-focal objects are not clamped and may produce very large or
/// negative values.
#[inline]
pub fn image_distance(focal_length: f64, object_distance: f64) -> f64 {
    if object_distance == focal_length {
        return f64::INFINITY;
    }
    if object_distance == 0.0 {
        return 0.0;
    }
    1.0 / (1.0 / focal_length - 1.0 / object_distance)
}

/// Lateral magnification `M = -q/p`.
///
/// Saturates to `f64::INFINITY` when the image is at positive infinity or
/// the object sits on the lens plane.
#[inline]
pub fn magnification(image_distance: f64, object_distance: f64) -> f64 {
    if image_distance == f64::INFINITY || object_distance == 0.0 {
        return f64::INFINITY;
    }
    -image_distance / object_distance
}

/// Image height for an input height and a magnification.
#[inline]
pub fn image_height(object_height: f64, magnification: f64) -> f64 {
    object_height * magnification
}

/// Returns true if `(f, p)` triggers one of the degenerate guard clauses.
#[inline]
pub fn is_degenerate(focal_length: f64, object_distance: f64) -> bool {
    object_distance == focal_length || object_distance == 0.0
}
