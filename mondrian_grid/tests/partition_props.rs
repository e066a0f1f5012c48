// Property tests for the biased partitioner.
//
// The exact-sum law must hold for every valid `PartitionSpec` and every generator
// state. The bounds only hold approximately after the rescale, so they are
// checked on a `PartitionSpec` whose drift is analytically limited: with n = 10,
// total = 765, min = 60 and max = min + 0.9 * rest, at most one slot can be
// clamped and the rescale factor stays below 1.05.

use mondrian_grid::partition::{PartitionSpec, allocate, allocate_traced};
use mondrian_grid::prng::{GridRng, SequenceRng};
use mondrian_grid::weights::position_weights;
use proptest::prelude::*;

proptest! {
    #[test]
    fn segments_sum_to_total(
        n in 1usize..40,
        min in 0.1f64..20.0,
        extra in 0.0f64..2000.0,
        headroom in 0.0f64..500.0,
        spread in 0.5f64..3.0,
        power in 1.0f64..3.0,
        seed in any::<u64>(),
    ) {
        let spec = PartitionSpec {
            total: n as f64 * min + extra,
            min,
            max: min + headroom,
            spread,
        };
        let weights = position_weights(n, power);
        let mut rng = GridRng::new(seed);
        let out = allocate(&spec, &weights, &mut rng);
        prop_assert_eq!(out.len(), n);
        let sum: f64 = out.iter().sum();
        prop_assert!((sum - spec.total).abs() <= spec.total * 1e-9, "sum {} vs {}", sum, spec.total);
        prop_assert!(out.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn bounded_drift_stays_near_bounds(
        spread in 0.5f64..3.0,
        seed in any::<u64>(),
    ) {
        let rest = 765.0 - 600.0;
        let spec = PartitionSpec { total: 765.0, min: 60.0, max: 60.0 + 0.9 * rest, spread };
        let traced = allocate_traced(&spec, &position_weights(10, 2.0), &mut GridRng::new(seed));
        prop_assert!(traced.scale >= 1.0 - 1e-12 && traced.scale < 1.05);
        for v in &traced.segments {
            prop_assert!(*v >= spec.min - 1e-9);
            prop_assert!(*v <= spec.max * 1.05);
        }
        for v in &traced.clamped {
            prop_assert!(*v >= spec.min && *v <= spec.max);
        }
    }

    #[test]
    fn one_draw_per_slot(
        n in 1usize..30,
        draws in proptest::collection::vec(0.0f64..1.0, 1..8),
    ) {
        let spec = PartitionSpec { total: 900.0, min: 10.0, max: 200.0, spread: 2.0 };
        let mut rng = SequenceRng::new(draws);
        allocate(&spec, &position_weights(n, 2.2), &mut rng);
        prop_assert_eq!(rng.consumed(), n);
    }
}
