//! TOML configuration for propagation and sweep runs.
//!
//! Every section is optional. Defaults reproduce the reference scenario:
//! a 10 cm object 2 cm in front of six `f = 25 cm` lenses spaced 1 cm
//! apart.

use crate::lens::{InvalidConfiguration, LensSystem};
use crate::presentation::{ColorScale, SaturationCap, DEFAULT_BANDS, DEFAULT_DECIMALS};
use crate::sweep::{RangeError, SampleAxis, SampleRange, SweepAnalyzer, DEFAULT_MAX_CELLS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on samples along a single sweep axis.
pub const MAX_AXIS_SAMPLES: usize = 10_000;

/// Configuration loading and validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid lens system: {0}")]
    System(#[from] InvalidConfiguration),
    #[error("invalid {axis} axis: {source}")]
    Axis {
        axis: &'static str,
        #[source]
        source: RangeError,
    },
    #[error("sweep of {cells} cells exceeds max_cells {max}")]
    GridTooLarge { cells: usize, max: usize },
    #[error("saturation threshold must be positive, got {0}")]
    InvalidThreshold(f64),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// The lens cascade and the object in front of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Object height in cm.
    pub object_height: f64,
    /// Focal lengths in optical-path order, cm.
    pub focal_lengths: Vec<f64>,
    /// Object distance followed by inter-lens gaps, cm.
    pub gaps: Vec<f64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            object_height: 10.0,
            focal_lengths: vec![25.0; 6],
            gaps: vec![2.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl SystemConfig {
    /// Validates the lens list.
    ///
    /// The gap count is only checked when the system is propagated, since
    /// sweeps generate their own gaps.
    pub fn lens_system(&self) -> Result<LensSystem, ConfigError> {
        Ok(LensSystem::from_focal_lengths(&self.focal_lengths)?)
    }
}

/// Sweep axes and execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Initial object distances (grid rows).
    pub distances: SampleAxis,
    /// Uniform inter-lens gaps (grid columns).
    pub gaps: SampleAxis,
    /// Evaluate cells on the rayon thread pool.
    pub parallel: bool,
    /// Refuse sweeps with more cells than this.
    pub max_cells: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            distances: SampleRange::new(1.0, 50.0, 1.0).into(),
            gaps: SampleRange::new(0.0, 10.0, 0.5).into(),
            parallel: true,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl SweepConfig {
    /// Resolves both axes, enforcing per-axis and whole-grid limits.
    pub fn axes(&self) -> Result<(Vec<f64>, Vec<f64>), ConfigError> {
        let distances = self
            .distances
            .values(MAX_AXIS_SAMPLES)
            .map_err(|source| ConfigError::Axis {
                axis: "distance",
                source,
            })?;
        let gaps = self
            .gaps
            .values(MAX_AXIS_SAMPLES)
            .map_err(|source| ConfigError::Axis { axis: "gap", source })?;

        let cells = distances.len() * gaps.len();
        if cells > self.max_cells {
            return Err(ConfigError::GridTooLarge {
                cells,
                max: self.max_cells,
            });
        }
        Ok((distances, gaps))
    }

    /// Builds an analyzer for the given system using these settings.
    pub fn analyzer(&self, system: LensSystem, object_height: f64) -> SweepAnalyzer {
        SweepAnalyzer::new(system, object_height)
            .parallel(self.parallel)
            .with_max_cells(self.max_cells)
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Magnitudes at or above this render as saturated.
    pub saturation_threshold: f64,
    /// Decimals in printed values.
    pub decimals: usize,
    /// Heatmap gradient.
    pub gradient: ColorScale,
    /// Number of heatmap colour bands.
    pub bands: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            saturation_threshold: SaturationCap::default().threshold,
            decimals: DEFAULT_DECIMALS,
            gradient: ColorScale::default(),
            bands: DEFAULT_BANDS,
        }
    }
}

impl DisplayConfig {
    pub fn cap(&self) -> SaturationCap {
        SaturationCap::new(self.saturation_threshold)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails this comparison too
        if !(self.saturation_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(self.saturation_threshold));
        }
        Ok(())
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl FileConfig {
    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.system.lens_system()?;
        self.sweep.axes()?;
        self.display.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.system.lens_system().unwrap().len(), 6);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.system.object_height, 10.0);
        assert_eq!(config.display.decimals, 2);
        assert_eq!(config.display.saturation_threshold, 1000.0);
    }

    #[test]
    fn test_full_file() {
        let config = FileConfig::from_toml(
            r#"
            [system]
            object_height = 4.0
            focal_lengths = [25.0, -10.0]
            gaps = [30.0, 5.0]

            [sweep]
            distances = { start = 1.0, end = 3.0, step = 1.0 }
            gaps = [0.5, 1.5]
            parallel = false
            max_cells = 100

            [display]
            saturation_threshold = 50.0
            decimals = 3
            gradient = "inferno"
            bands = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.system.focal_lengths, vec![25.0, -10.0]);
        let (distances, gaps) = config.sweep.axes().unwrap();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
        assert_eq!(gaps, vec![0.5, 1.5]);
        assert_eq!(config.display.gradient, ColorScale::Inferno);
        assert_eq!(config.display.cap().threshold, 50.0);
    }

    #[test]
    fn test_zero_focal_length_invalid() {
        let err = FileConfig::from_toml("[system]\nobject_height = 1.0\nfocal_lengths = [0.0]\ngaps = [1.0]")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::System(InvalidConfiguration::ZeroFocalLength { index: 1 })
        ));
    }

    #[test]
    fn test_grid_limit() {
        let mut config = FileConfig::default();
        config.sweep.max_cells = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { max: 10, .. })
        ));
    }

    #[test]
    fn test_bad_axis_reported() {
        let mut config = FileConfig::default();
        config.sweep.gaps = SampleRange::new(0.0, 1.0, -1.0).into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Axis { axis: "gap", .. })
        ));
    }

    #[test]
    fn test_oversized_range_in_file() {
        let err = FileConfig::from_toml("[sweep]\ndistances = { start = 0.0, end = 1e20, step = 1.0 }")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Axis {
                axis: "distance",
                source: RangeError::TooManySamples { .. }
            }
        ));
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = FileConfig::default();
        config.display.saturation_threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = FileConfig::from_toml("[sweep]\nparallel = false\ngaps = [1, 2]").unwrap();
        assert!(!config.sweep.parallel);
        assert_eq!(config.sweep.max_cells, DEFAULT_MAX_CELLS);
        assert_eq!(config.sweep.axes().unwrap().1, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            FileConfig::from_toml("[system\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
