//! Run configuration.
//!
//! A single TOML file describes the lens system, the sweep axes and the
//! display settings. Command-line flags override individual values.

mod file;

pub use file::{
    ConfigError, DisplayConfig, FileConfig, SweepConfig, SystemConfig, MAX_AXIS_SAMPLES,
};
