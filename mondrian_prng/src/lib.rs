// Deterministic, portable randomness for grid generation.
//
// Two pieces live here:
//
// - `RandomSource`: the only capability the generator needs, a stream of
//   floats in [0, 1). Every draw in `mondrian_grid` (gap jitter, segment
//   weights, block placement, agent seeding, chase turns) goes through it,
//   so tests can substitute a scripted source and assert exact outputs.
// - `GridRng`: xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64
//   seeding. The production source. Its state serializes with serde so a
//   scene can be saved mid-stream and resumed bit-for-bit.
//
// `SequenceRng` replays a fixed list of draws, cycling when exhausted. It is
// meant for tests that need to steer individual decisions.
//
// **Critical constraint: determinism.** Given the same seed, `GridRng` must
// produce the same stream on every platform. The core generator uses integer
// arithmetic only; floats appear only when converting a finished `u64`.

use serde::{Deserialize, Serialize};

/// A source of uniform draws in `[0, 1)`.
///
/// Implementors supply `next_f64`; everything else is derived from it so
/// that a scripted source steers every decision the generator makes.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value between `low` and `high`.
    ///
    /// Linear in the draw, so `low == high` returns `low` and a reversed
    /// range still produces a value between the two ends.
    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// Return `true` with probability `p`.
    ///
    /// `p <= 0.0` never fires, `p >= 1.0` always fires.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `[0, len)`.
    ///
    /// Panics if `len == 0`.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "index: len must be positive");
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// `1.0` or `-1.0` with equal probability.
    fn sign(&mut self) -> f64 {
        if self.chance(0.5) { 1.0 } else { -1.0 }
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }
}

/// Xoshiro256++ generator, the workspace's production `RandomSource`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRng {
    s: [u64; 4],
}

impl GridRng {
    /// Seed from a single `u64`, expanded to 256 bits through SplitMix64.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = self.s[0]
            .wrapping_add(self.s[3])
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }
}

impl RandomSource for GridRng {
    /// Top 53 bits of the next `u64`, scaled into `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a scripted list of draws, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far (not wrapped).
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// SplitMix64 step, used only to expand the seed.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
