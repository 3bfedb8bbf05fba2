//! Lens Cascade Library
//!
//! Paraxial propagation of an object through a sequence of ideal thin
//! lenses separated by free-space gaps, plus two-dimensional sweeps that
//! map how total magnification depends on object distance and lens
//! spacing.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! sweep → propagation → lens (thin-lens arithmetic)
//!   ↓          ↓
//!       presentation / metrics
//! ```
//!
//! # Design Principles
//!
//! - **Pure core**: propagation has no side effects and returns value objects
//! - **Sentinels, not errors**: objects at the focal point or on the lens
//!   yield IEEE infinities that propagate through later stages
//! - **Fail before work**: invalid lens systems are rejected before any stage runs
//! - **Raw grids**: sweeps return uncapped values; capping is a display concern
//!
//! # Example
//!
//! ```
//! use lens_cascade::{
//!     lens::LensSystem,
//!     presentation::{GridTable, SaturationCap, SystemReport},
//!     sweep::SweepAnalyzer,
//! };
//!
//! let system = LensSystem::from_focal_lengths(&[25.0; 6]).unwrap();
//!
//! // Single system
//! let result = system.propagate(10.0, &[2.0, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
//! println!("{}", SystemReport::new(&result));
//!
//! // Sensitivity sweep
//! let grid = SweepAnalyzer::new(system, 10.0)
//!     .parallel(true)
//!     .run(&[1.0, 2.0, 5.0], &[0.5, 1.0])
//!     .unwrap();
//! println!("{}", GridTable::new(&grid).with_cap(SaturationCap::new(1000.0)));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod lens;
pub mod metrics;
pub mod presentation;
pub mod propagation;
pub mod sweep;

// Re-export commonly used types at crate root
pub use config::FileConfig;
pub use lens::{InvalidConfiguration, LensSpec, LensSystem};
pub use propagation::{propagate, StageResult, SystemResult};
pub use sweep::{sweep, MagnificationGrid, SweepAnalyzer, SweepError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
