//! Integer HSV conversion over six hue hextants.
//!
//! Hue, saturation and value all live in the same `[0, MAX]` range as
//! the RGB channels. The hue circle splits into six hextants; inside
//! each, one channel ramps linearly between the whiteness floor
//! `(MAX - s) * v / MAX` and the peak `v` while the other two sit at
//! the floor or the peak.

use crate::math::map_range;

use super::{ColorChannel, LedColor};

/// Hextant boundary `i` on the `[0, MAX]` hue circle, round-to-nearest.
fn hextant<C: ColorChannel>(i: u32) -> i64 {
    ((u64::from(i) * (u64::from(C::MAX) + 1) + 3) / 6) as i64
}

/// Linear map of `x` from `[in_low, in_high]` to `[out_low, out_high]`
/// in integer arithmetic. The output bounds may run backwards.
fn ramp(x: i64, in_low: i64, in_high: i64, out_low: i64, out_high: i64) -> i64 {
    if in_high == in_low {
        return out_low;
    }
    (x - in_low) * (out_high - out_low) / (in_high - in_low) + out_low
}

impl<C: ColorChannel> LedColor<C> {
    /// Factory form of [`set_hsv`](Self::set_hsv).
    pub fn hsv(h: C, s: C, v: C) -> Self {
        let mut co = Self::default();
        co.set_hsv(h, s, v);
        co
    }

    /// Set from hue, saturation and value, each in `[0, MAX]`.
    pub fn set_hsv(&mut self, h: C, s: C, v: C) {
        let max = i64::from(C::MAX);
        let h = i64::from(h.to_u32());
        let v = i64::from(v.to_u32());
        // Whiteness floor: how far off full saturation, scaled by value.
        let s = (max - i64::from(s.to_u32())) * v / max;

        let h0 = hextant::<C>(0);
        let h1 = hextant::<C>(1);
        let h2 = hextant::<C>(2);
        let h3 = hextant::<C>(3);
        let h4 = hextant::<C>(4);
        let h5 = hextant::<C>(5);
        let h6 = hextant::<C>(6);

        let (r, g, b) = if h < h1 {
            (v, ramp(h, h0, h1, s, v), s)
        } else if h < h2 {
            (ramp(h, h1, h2, v, s), v, s)
        } else if h < h3 {
            (s, v, ramp(h, h2, h3, s, v))
        } else if h < h4 {
            (s, ramp(h, h3, h4, v, s), v)
        } else if h < h5 {
            (ramp(h, h4, h5, s, v), s, v)
        } else {
            (v, s, ramp(h, h5, h6, v, s))
        };

        self.r = C::from_u32(r.clamp(0, max) as u32);
        self.g = C::from_u32(g.clamp(0, max) as u32);
        self.b = C::from_u32(b.clamp(0, max) as u32);
    }

    /// Float variant: `h` in `[0, MAX)`, `s` and `v` in `[0, 1]`.
    pub fn set_hsv_f32(&mut self, h: f32, s: f32, v: f32) {
        let max = C::MAX as f32;
        let s = (1.0 - s) * v;

        let hx = |i: u32| i as f32 * max / 6.0;
        let (r, g, b) = if h < hx(1) {
            (v, map_range(h, hx(0), hx(1), s, v), s)
        } else if h < hx(2) {
            (map_range(h, hx(1), hx(2), v, s), v, s)
        } else if h < hx(3) {
            (s, v, map_range(h, hx(2), hx(3), s, v))
        } else if h < hx(4) {
            (s, map_range(h, hx(3), hx(4), v, s), v)
        } else if h < hx(5) {
            (map_range(h, hx(4), hx(5), s, v), s, v)
        } else {
            (v, s, map_range(h, hx(5), hx(6), v, s))
        };

        self.r = C::from_u32((max * r) as u32);
        self.g = C::from_u32((max * g) as u32);
        self.b = C::from_u32((max * b) as u32);
    }

    /// Recover `(h, s, v)` from the channel values.
    ///
    /// Value is exact (the max channel). When the color is black or
    /// grey there is no winning hextant and hue comes back 0.
    pub fn to_hsv(&self) -> (C, C, C) {
        let r = self.r.to_u32();
        let g = self.g.to_u32();
        let b = self.b.to_u32();
        let max = C::MAX as f32;

        // 0: r, 1: g, 2: b
        let (max_component, min_component) = if r > g {
            (if r > b { 0 } else { 2 }, if g < b { 1 } else { 2 })
        } else {
            (if g > b { 1 } else { 2 }, if r < b { 0 } else { 2 })
        };

        let chan = [r, g, b];
        let v = chan[max_component];
        if v == 0 {
            return (C::from_u32(0), C::from_u32(0), C::from_u32(0));
        }
        let s = map_range(chan[min_component] as f32, 0.0, v as f32, max, 0.0);

        let hx = |i: u32| hextant::<C>(i) as f32;
        let h = match (max_component, min_component) {
            // red max, blue min: from red to yellow
            (0, 2) => map_range(g as f32, 0.0, r as f32, hx(0), hx(1)),
            // green max, blue min: from yellow to green
            (1, 2) => map_range(r as f32, 0.0, g as f32, hx(2), hx(1)),
            // green max, red min: from green to cyan
            (1, 0) => map_range(b as f32, 0.0, g as f32, hx(2), hx(3)),
            // blue max, red min: from cyan to blue
            (2, 0) => map_range(g as f32, 0.0, b as f32, hx(4), hx(3)),
            // blue max, green min: from blue to magenta
            (2, 1) => map_range(r as f32, 0.0, b as f32, hx(4), hx(5)),
            // red max, green min: from magenta to red
            (0, 1) => map_range(b as f32, 0.0, r as f32, hx(6), hx(5)),
            // no clear winner, hue is 0
            _ => 0.0,
        };

        (
            C::from_u32(h as u32),
            C::from_u32(s as u32),
            C::from_u32(v),
        )
    }
}
