//! Prometheus metrics for propagation and sweep runs.
//!
//! # Metrics Exposed
//!
//! - `lens_cascade_propagations_total` - Lens-system propagations performed
//! - `lens_cascade_stages_total` - Lens stages evaluated
//! - `lens_cascade_degenerate_stages_total` - Stages that hit the focal-point or on-lens guard
//! - `lens_cascade_sweep_cells_total` - Sweep grid cells evaluated
//! - `lens_cascade_saturated_cells` - Saturated cells in the latest sweep
//! - `lens_cascade_last_total_magnification` - Total magnification of the latest single run
//!
//! The propagator itself never records anything. Callers build a
//! [`MetricsSnapshot`] from a finished result and hand it to the registry.
//!
//! # Example
//!
//! ```
//! use lens_cascade::metrics::{MetricsRegistry, MetricsSnapshot};
//! use lens_cascade::propagation::propagate;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let result = propagate(10.0, &[25.0], &[2.0]).unwrap();
//!
//! registry.record(&MetricsSnapshot::from_system(&result));
//! assert!(registry.encode().unwrap().contains("lens_cascade_propagations_total 1"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
