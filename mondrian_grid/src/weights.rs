// Positional bias weights for the partitioner.
//
// Slot `i` of `n` gets `t^power + 0.05`, where `t` is 1.0 at the middle
// slot(s) and falls linearly to 0.0 at both ends. The additive floor keeps
// edge slots from starving; `power` sharpens the peak.

/// Floor added to every weight so no slot ever has zero pull.
pub const WEIGHT_FLOOR: f64 = 0.05;

/// Centre-peaked weights for `n` slots. A single slot gets `1.0`.
pub fn position_weights(n: usize, power: f64) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    let mid = (n as f64 - 1.0) / 2.0;
    (0..n)
        .map(|i| {
            let t = 1.0 - ((i as f64 - mid) / mid).abs();
            t.powf(power) + WEIGHT_FLOOR
        })
        .collect()
}
