//! Sequential propagation through a thin-lens cascade.
//!
//! Each lens images the current object; that image, offset by the gap to
//! the next lens, becomes the next object. Cumulative magnification is a
//! running product carried through an iterator scan, so every stage
//! records its own partial product.

use super::{StageResult, SystemResult};
use crate::lens::{formulas, InvalidConfiguration, LensSystem};

/// State carried from one stage to the next.
#[derive(Debug, Clone, Copy)]
struct Carry {
    object_distance: f64,
    cumulative_magnification: f64,
}

impl LensSystem {
    /// Propagates an object of the given height through the system.
    ///
    /// `gaps[0]` is the object-to-first-lens distance and `gaps[i]` the
    /// distance from lens `i` to lens `i + 1` (1-based lenses). The gap
    /// after the last lens defaults to zero.
    ///
    /// Degenerate stages produce infinities instead of errors, and those
    /// values flow into later stages under IEEE 754 rules.
    pub fn propagate(
        &self,
        object_height: f64,
        gaps: &[f64],
    ) -> Result<SystemResult, InvalidConfiguration> {
        self.check_gaps(gaps)?;

        let start = Carry {
            object_distance: gaps[0],
            cumulative_magnification: 1.0,
        };

        let stages: Vec<StageResult> = self
            .lenses()
            .iter()
            .enumerate()
            .scan(start, |carry, (i, lens)| {
                let p = carry.object_distance;
                let q = formulas::image_distance(lens.focal_length, p);
                let m = formulas::magnification(q, p);
                let cumulative = carry.cumulative_magnification * m;

                let gap_after = gaps.get(i + 1).copied().unwrap_or(0.0);
                *carry = Carry {
                    object_distance: gap_after - q,
                    cumulative_magnification: cumulative,
                };

                Some(StageResult {
                    index: i + 1,
                    focal_length: lens.focal_length,
                    object_distance: p,
                    image_distance: q,
                    magnification: m,
                    cumulative_magnification: cumulative,
                    cumulative_image_height: formulas::image_height(object_height, cumulative),
                })
            })
            .collect();

        Ok(SystemResult::new(stages))
    }
}

/// Validates a bare focal-length list and propagates in one call.
///
/// Fails with [`InvalidConfiguration`] for an empty lens list, a zero
/// focal length, or too few gaps. No stage runs in any of those cases.
pub fn propagate(
    object_height: f64,
    focal_lengths: &[f64],
    gaps: &[f64],
) -> Result<SystemResult, InvalidConfiguration> {
    LensSystem::from_focal_lengths(focal_lengths)?.propagate(object_height, gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_lens_fixture() {
        let result = propagate(10.0, &[25.0], &[2.0]).unwrap();

        assert_eq!(result.stages().len(), 1);
        let stage = &result.stages()[0];
        assert_eq!(stage.index, 1);
        assert_eq!(stage.object_distance, 2.0);
        assert_close(stage.image_distance, -2.173_913_043_478_260_8);
        assert_close(stage.magnification, 1.086_956_521_739_130_4);
        assert_close(result.final_image_height(), 10.869_565_217_391_305);
        assert_eq!(result.final_image_position(), stage.image_distance);
    }

    #[test]
    fn test_six_lens_golden_chain() {
        // (p, q, M, cumulative M, cumulative height) per stage
        let expected = [
            (2.0, -2.173_913_043_478_260_8, 1.086_956_521_739_130_4, 1.086_956_521_739_130_4, 10.869_565_217_391_305),
            (3.173_913_043_478_260_8, -3.635_458_167_330_676_7, 1.145_418_326_693_227, 1.245_019_920_318_724_9, 12.450_199_203_187_25),
            (4.635_458_167_330_677, -5.690_599_628_289_152, 1.227_623_985_131_566_2, 1.528_416_316_149_858, 15.284_163_161_498_581),
            (6.690_599_628_289_152, -9.135_470_704_199_768, 1.365_418_828_167_990_7, 2.086_928_415_350_176_4, 20.869_284_153_501_763),
            (10.135_470_704_199_768, -17.046_403_728_141_27, 1.681_856_149_125_651, 3.509_913_388_141_744_6, 35.099_133_881_417_444),
            (18.046_403_728_141_27, -64.881_548_419_683_36, 3.595_261_936_787_334, 12.619_058_005_806_282, 126.190_580_058_062_82),
        ];

        let result = propagate(10.0, &[25.0; 6], &[2.0, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(result.stages().len(), 6);

        for (stage, &(p, q, m, cm, h)) in result.stages().iter().zip(expected.iter()) {
            assert_close(stage.object_distance, p);
            assert_close(stage.image_distance, q);
            assert_close(stage.magnification, m);
            assert_close(stage.cumulative_magnification, cm);
            assert_close(stage.cumulative_image_height, h);
        }

        assert_close(result.total_magnification(), 12.619_058_005_806_282);
        assert_close(result.final_image_position(), -64.881_548_419_683_36);
        assert_close(result.final_image_height(), 126.190_580_058_062_82);
    }

    #[test]
    fn test_next_object_is_gap_minus_image() {
        let result = propagate(1.0, &[10.0, 10.0], &[20.0, 50.0]).unwrap();
        let first = &result.stages()[0];
        let second = &result.stages()[1];
        assert_close(first.image_distance, 20.0);
        assert_eq!(second.object_distance, 50.0 - first.image_distance);
    }

    #[test]
    fn test_object_at_focal_point_propagates_infinity() {
        let result = propagate(2.0, &[10.0, 5.0], &[10.0, 3.0]).unwrap();
        let first = &result.stages()[0];
        assert_eq!(first.image_distance, f64::INFINITY);
        assert_eq!(first.magnification, f64::INFINITY);
        assert_eq!(first.cumulative_image_height, f64::INFINITY);
        assert!(first.is_degenerate());

        // Infinite image becomes an object at -inf, which images at the focal point
        let second = &result.stages()[1];
        assert_eq!(second.object_distance, f64::NEG_INFINITY);
        assert_close(second.image_distance, 5.0);
        assert_eq!(result.degenerate_stages(), 1);
    }

    #[test]
    fn test_object_on_lens_saturates_magnification() {
        let result = propagate(-3.0, &[25.0], &[0.0]).unwrap();
        let stage = &result.stages()[0];
        assert_eq!(stage.image_distance, 0.0);
        assert_eq!(stage.magnification, f64::INFINITY);
        assert_eq!(result.final_image_height(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_negative_height_is_valid() {
        let result = propagate(-10.0, &[25.0], &[2.0]).unwrap();
        assert_close(result.final_image_height(), -10.869_565_217_391_305);
    }

    #[test]
    fn test_empty_lenses_rejected() {
        assert_eq!(
            propagate(10.0, &[], &[2.0]),
            Err(InvalidConfiguration::NoLenses)
        );
    }

    #[test]
    fn test_short_gaps_rejected() {
        assert!(matches!(
            propagate(10.0, &[25.0, 25.0, 25.0], &[2.0, 1.0]),
            Err(InvalidConfiguration::MissingGaps { expected: 3, got: 2, .. })
        ));
        assert!(matches!(
            propagate(10.0, &[25.0], &[]),
            Err(InvalidConfiguration::MissingGaps { .. })
        ));
    }

    #[test]
    fn test_zero_focal_length_rejected() {
        assert_eq!(
            propagate(10.0, &[25.0, 0.0], &[2.0, 1.0]),
            Err(InvalidConfiguration::ZeroFocalLength { index: 2 })
        );
    }

    #[test]
    fn test_trailing_gap_does_not_change_results() {
        let short = propagate(10.0, &[25.0, -15.0], &[2.0, 4.0]).unwrap();
        let long = propagate(10.0, &[25.0, -15.0], &[2.0, 4.0, 9.0]).unwrap();
        assert_eq!(short, long);
    }

    fn focal_length() -> impl Strategy<Value = f64> {
        prop_oneof![-200.0f64..-1.0, 1.0f64..200.0]
    }

    proptest! {
        #[test]
        fn cumulative_magnification_is_running_product(
            lenses in prop::collection::vec(focal_length(), 1..=10),
            gaps in prop::collection::vec(0.5f64..100.0, 11),
            height in -50.0f64..50.0,
        ) {
            let result = propagate(height, &lenses, &gaps[..=lenses.len()]).unwrap();
            prop_assert_eq!(result.stages().len(), lenses.len());

            let mut product = 1.0;
            for stage in result.stages() {
                product *= stage.magnification;
                prop_assert_eq!(stage.cumulative_magnification.to_bits(), product.to_bits());
                prop_assert_eq!(
                    stage.cumulative_image_height.to_bits(),
                    (height * stage.cumulative_magnification).to_bits()
                );
            }
        }

        #[test]
        fn stage_object_distance_follows_recurrence(
            lenses in prop::collection::vec(focal_length(), 2..=10),
            gaps in prop::collection::vec(0.5f64..100.0, 11),
        ) {
            let result = propagate(1.0, &lenses, &gaps).unwrap();
            for pair in result.stages().windows(2) {
                let gap = gaps[pair[0].index];
                let expected = gap - pair[0].image_distance;
                prop_assert!(
                    pair[1].object_distance.to_bits() == expected.to_bits()
                );
            }
        }
    }
}
