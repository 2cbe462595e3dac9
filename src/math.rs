//! Small numeric helpers shared by fills, color conversion and
//! parameter interpolation.

use libm::fmodf;

/// Clamp `x` into `[low, high]`.
pub fn pin_range(x: f32, low: f32, high: f32) -> f32 {
    x.clamp(low, high)
}

/// Integer clamp of `x` into `[low, high]`.
pub fn pin_range_i(x: i32, low: i32, high: i32) -> i32 {
    x.clamp(low, high)
}

/// Linear map of `x` from `[in_low, in_high]` to `[out_low, out_high]`,
/// with the result pinned inside the output range. The output bounds
/// may run backwards.
pub fn map_range(x: f32, in_low: f32, in_high: f32, out_low: f32, out_high: f32) -> f32 {
    let y = map_range_no_pin(x, in_low, in_high, out_low, out_high);
    if out_low <= out_high {
        pin_range(y, out_low, out_high)
    } else {
        pin_range(y, out_high, out_low)
    }
}

/// Linear map of `x` from `[in_low, in_high]` to `[out_low, out_high]`,
/// extrapolating freely outside the input range.
pub fn map_range_no_pin(x: f32, in_low: f32, in_high: f32, out_low: f32, out_high: f32) -> f32 {
    if in_high == in_low {
        return out_low;
    }
    (x - in_low) * (out_high - out_low) / (in_high - in_low) + out_low
}

/// Modulo with the result always in `[0, m)`, for ring indexing.
pub fn umod(x: i32, m: i32) -> i32 {
    let r = x % m;
    if r < 0 { r + m } else { r }
}

/// Float modulo with the result always in `[0, m)`.
pub fn umod_f(x: f32, m: f32) -> f32 {
    let r = fmodf(x, m);
    if r < 0.0 { r + m } else { r }
}

/// Step `x` toward `target` by at most `amount`, without overshooting.
pub fn migrate_f(x: f32, target: f32, amount: f32) -> f32 {
    if x < target {
        (x + amount).min(target)
    } else {
        (x - amount).max(target)
    }
}
