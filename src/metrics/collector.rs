//! Metrics collection and registry.

use crate::presentation::SaturationCap;
use crate::propagation::SystemResult;
use crate::sweep::MagnificationGrid;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Counts taken from one propagation or sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Propagation calls represented (1 per system, 1 per sweep cell).
    pub propagations: u64,
    /// Lens stages evaluated.
    pub stages: u64,
    /// Stages that hit a degenerate guard. Only known for single systems.
    pub degenerate_stages: u64,
    /// Sweep cells evaluated.
    pub sweep_cells: u64,
    /// Sweep cells at or above the saturation cap.
    pub saturated_cells: u64,
    /// Total magnification of a single-system run.
    pub total_magnification: Option<f64>,
}

impl MetricsSnapshot {
    /// Snapshot of a single propagation.
    pub fn from_system(result: &SystemResult) -> Self {
        Self {
            propagations: 1,
            stages: result.stages().len() as u64,
            degenerate_stages: result.degenerate_stages() as u64,
            total_magnification: Some(result.total_magnification()),
            ..Default::default()
        }
    }

    /// Snapshot of a sweep over a system with `lenses` lenses.
    pub fn from_grid(grid: &MagnificationGrid, lenses: usize, cap: &SaturationCap) -> Self {
        let cells = grid.len() as u64;
        Self {
            propagations: cells,
            stages: cells * lenses as u64,
            sweep_cells: cells,
            saturated_cells: cap.count_saturated(grid.values()) as u64,
            ..Default::default()
        }
    }
}

/// Prometheus metrics registry for propagation runs.
pub struct MetricsRegistry {
    registry: Registry,

    propagations_total: IntCounter,
    stages_total: IntCounter,
    degenerate_stages_total: IntCounter,
    sweep_cells_total: IntCounter,
    saturated_cells: IntGauge,
    last_total_magnification: Gauge,
}

impl MetricsRegistry {
    /// Creates a new registry with every metric registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let propagations_total = IntCounter::new(
            "lens_cascade_propagations_total",
            "Total number of lens-system propagations",
        )?;
        let stages_total = IntCounter::new(
            "lens_cascade_stages_total",
            "Total number of lens stages evaluated",
        )?;
        let degenerate_stages_total = IntCounter::new(
            "lens_cascade_degenerate_stages_total",
            "Stages with the object at the focal point or on the lens",
        )?;
        let sweep_cells_total = IntCounter::new(
            "lens_cascade_sweep_cells_total",
            "Total number of sweep grid cells evaluated",
        )?;
        let saturated_cells = IntGauge::new(
            "lens_cascade_saturated_cells",
            "Saturated cells in the most recent sweep",
        )?;
        let last_total_magnification = Gauge::new(
            "lens_cascade_last_total_magnification",
            "Total magnification of the most recent single-system run",
        )?;

        registry.register(Box::new(propagations_total.clone()))?;
        registry.register(Box::new(stages_total.clone()))?;
        registry.register(Box::new(degenerate_stages_total.clone()))?;
        registry.register(Box::new(sweep_cells_total.clone()))?;
        registry.register(Box::new(saturated_cells.clone()))?;
        registry.register(Box::new(last_total_magnification.clone()))?;

        Ok(Self {
            registry,
            propagations_total,
            stages_total,
            degenerate_stages_total,
            sweep_cells_total,
            saturated_cells,
            last_total_magnification,
        })
    }

    /// Adds a snapshot's counts to the registry.
    pub fn record(&self, snapshot: &MetricsSnapshot) {
        self.propagations_total.inc_by(snapshot.propagations);
        self.stages_total.inc_by(snapshot.stages);
        self.degenerate_stages_total.inc_by(snapshot.degenerate_stages);

        if snapshot.sweep_cells > 0 {
            self.sweep_cells_total.inc_by(snapshot.sweep_cells);
            self.saturated_cells.set(snapshot.saturated_cells as i64);
        }
        if let Some(m) = snapshot.total_magnification {
            self.last_total_magnification.set(m);
        }
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::propagate;
    use crate::sweep::sweep;

    #[test]
    fn test_registry_creation() {
        assert!(MetricsRegistry::new().is_ok());
    }

    #[test]
    fn test_system_snapshot() {
        let result = propagate(2.0, &[10.0, 5.0], &[10.0, 3.0]).unwrap();
        let snapshot = MetricsSnapshot::from_system(&result);

        assert_eq!(snapshot.propagations, 1);
        assert_eq!(snapshot.stages, 2);
        assert_eq!(snapshot.degenerate_stages, 1);
        assert_eq!(snapshot.sweep_cells, 0);
    }

    #[test]
    fn test_grid_snapshot() {
        let grid = sweep(1.0, &[25.0], &[25.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        let snapshot = MetricsSnapshot::from_grid(&grid, 1, &SaturationCap::default());

        assert_eq!(snapshot.sweep_cells, 6);
        assert_eq!(snapshot.stages, 6);
        assert_eq!(snapshot.saturated_cells, 3);
        assert_eq!(snapshot.total_magnification, None);
    }

    #[test]
    fn test_metrics_record_and_encode() {
        let registry = MetricsRegistry::new().unwrap();
        let result = propagate(10.0, &[25.0], &[2.0]).unwrap();

        registry.record(&MetricsSnapshot::from_system(&result));
        registry.record(&MetricsSnapshot::from_system(&result));

        let output = registry.encode().unwrap();
        assert!(output.contains("lens_cascade_propagations_total 2"));
        assert!(output.contains("lens_cascade_stages_total 2"));
        assert!(output.contains("lens_cascade_degenerate_stages_total 0"));
        assert!(output.contains("lens_cascade_last_total_magnification 1.08"));
    }
}
