// Biased partition of a fixed length into `n` segments.
//
// 1. Reserve `n * min` up front; the remainder (`rest`, never negative) is
//    shared out.
// 2. Each slot draws `u^spread` (u uniform in [0,1)) and multiplies it by its
//    positional weight.
// 3. Raw weights are normalised. A non-positive sum falls back to uniform.
// 4. `out[i] = min + share[i] * rest`, clamped to `[min, max]` when
//    `max > min`.
// 5. Everything is multiplied by `total / sum(out)` so the segments sum to
//    `total` exactly.
//
// Step 5 is a uniform rescale, so a slot pinned at `max` in step 4 can end
// up above `max` afterwards (and, when `n * min > total`, every slot ends up
// below `min`). The sum is the invariant; the bounds are a shaping hint.
// `allocate_traced` exposes the pre-rescale values and the factor so callers
// can measure that drift.

use log::debug;
use mondrian_prng::RandomSource;

/// Bounds and shape of one partition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartitionSpec {
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub spread: f64,
}

/// Outcome of `allocate_traced`.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    /// Final segments, summing to `total`.
    pub segments: Vec<f64>,
    /// Segments after clamping, before the rescale.
    pub clamped: Vec<f64>,
    /// Factor applied in the rescale step.
    pub scale: f64,
    /// True when the raw weights collapsed and uniform shares were used.
    pub uniform_fallback: bool,
}

/// Split `spec.total` into `weights.len()` segments. See module docs.
pub fn allocate(spec: &PartitionSpec, weights: &[f64], rng: &mut impl RandomSource) -> Vec<f64> {
    allocate_traced(spec, weights, rng).segments
}

/// `allocate`, keeping the intermediate values.
///
/// Consumes exactly one draw per slot.
pub fn allocate_traced(
    spec: &PartitionSpec,
    weights: &[f64],
    rng: &mut impl RandomSource,
) -> Allocation {
    let n = weights.len();
    if n == 0 {
        return Allocation {
            segments: Vec::new(),
            clamped: Vec::new(),
            scale: 1.0,
            uniform_fallback: false,
        };
    }

    let rest = (spec.total - n as f64 * spec.min).max(0.0);

    let mut raw: Vec<f64> = weights
        .iter()
        .map(|w| w * rng.next_f64().powf(spec.spread))
        .collect();
    let mut raw_sum: f64 = raw.iter().sum();
    let uniform_fallback = raw_sum.is_nan() || raw_sum <= 0.0;
    if uniform_fallback {
        debug!("partition: raw weights sum to {raw_sum}, using uniform shares");
        raw.fill(1.0);
        raw_sum = n as f64;
    }

    let clamp = spec.max > spec.min;
    let clamped: Vec<f64> = raw
        .iter()
        .map(|w| {
            let v = spec.min + (w / raw_sum) * rest;
            if clamp { v.clamp(spec.min, spec.max) } else { v }
        })
        .collect();

    let sum: f64 = clamped.iter().sum();
    let scale = if sum > 0.0 { spec.total / sum } else { 1.0 };
    let segments = clamped.iter().map(|v| v * scale).collect();

    Allocation {
        segments,
        clamped,
        scale,
        uniform_fallback,
    }
}
