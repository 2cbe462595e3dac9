//! Owned frame buffer for one physical LED run.
//!
//! Fill coordinates are real-valued pixel edges: any pixel fully inside
//! `[low, high)` takes the whole color, the two boundary pixels take
//! their covered fraction. Fills either add into existing content or
//! alpha-composite over it, and ring variants wrap modulo the strip
//! length.

use alloc::vec;
use alloc::vec::Vec;

use libm::floorf;

use crate::color::{ColorChannel, LedColor};
use crate::math::{map_range, umod};

#[derive(Clone, Copy, PartialEq, Eq)]
enum FillMode {
    Add,
    Replace,
}

/// A mutable buffer of [`LedColor`] pixels with sub-pixel fills.
#[derive(Debug, Clone)]
pub struct LedStrip<C: ColorChannel> {
    leds: Vec<LedColor<C>>,
    ring_zero: i32,
    ma_limit: u32,
}

impl<C: ColorChannel> LedStrip<C> {
    /// Create a strip of `led_count` black pixels.
    pub fn new(led_count: usize) -> Self {
        Self::with_ring_zero(led_count, 0)
    }

    /// Create a strip with a logical start point for ring fills.
    pub fn with_ring_zero(led_count: usize, ring_zero: i32) -> Self {
        Self {
            leds: vec![LedColor::default(); led_count],
            ring_zero,
            ma_limit: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn leds(&self) -> &[LedColor<C>] {
        &self.leds
    }

    pub fn leds_mut(&mut self) -> &mut [LedColor<C>] {
        &mut self.leds
    }

    pub fn led(&self, ix: usize) -> Option<&LedColor<C>> {
        self.leds.get(ix)
    }

    pub const fn ring_zero(&self) -> i32 {
        self.ring_zero
    }

    pub const fn set_ring_zero(&mut self, ring_zero: i32) {
        self.ring_zero = ring_zero;
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.fill(LedColor::default());
    }

    /// Set every pixel to one color.
    pub fn fill(&mut self, co: LedColor<C>) {
        self.leds.fill(co);
    }

    /// Scale every pixel in place, round-to-nearest. Used for
    /// crossfade dimming.
    pub fn scale(&mut self, n: f32) {
        for led in &mut self.leds {
            *led = led.scaled(n);
        }
    }

    /// Saturating add of another strip, pixel by pixel. Extra pixels on
    /// either side are left alone.
    pub fn add(&mut self, other: &Self) {
        for (dst, src) in self.leds.iter_mut().zip(&other.leds) {
            *dst += *src;
        }
    }

    /// Copy another strip's pixels; any remainder here goes black.
    pub fn copy_from(&mut self, other: &Self) {
        let k = self.leds.len().min(other.leds.len());
        self.leds[..k].copy_from_slice(&other.leds[..k]);
        for led in &mut self.leds[k..] {
            *led = LedColor::default();
        }
    }

    /// Set one whole pixel. Returns false if the index is out of range.
    pub fn set_led(&mut self, x: usize, co: LedColor<C>) -> bool {
        match self.leds.get_mut(x) {
            Some(led) => {
                *led = co;
                true
            }
            None => false,
        }
    }

    /// Additively light one pixel's width at a fractional position.
    pub fn set_led_f(&mut self, x: f32, co: LedColor<C>) {
        self.fill_range(x, x + 1.0, co, false);
    }

    /// Fill `[low, high)` with `co`, weighting the boundary pixels by
    /// their covered fraction.
    ///
    /// With `replace` the coverage alpha-composites over existing
    /// content; otherwise it adds. Ranges outside the strip are clipped
    /// silently.
    pub fn fill_range(&mut self, low: f32, high: f32, co: LedColor<C>, replace: bool) {
        let mode = if replace { FillMode::Replace } else { FillMode::Add };
        self.fill_range_m(low, high, co, mode);
    }

    fn fill_range_m(&mut self, mut low: f32, mut high: f32, co: LedColor<C>, mode: FillMode) {
        if self.leds.is_empty() {
            return;
        }
        let count = self.leds.len() as f32;
        if low >= count || high <= 0.0 {
            return;
        }
        low = low.max(0.0);
        high = high.min(count);

        let xi = floorf(low) as i32;
        let ei = floorf(high) as i32;

        if xi == ei {
            // only one LED lit
            let f = high - low;
            let led = &mut self.leds[xi as usize];
            if mode == FillMode::Replace {
                *led = led.scaled(1.0 - f);
            }
            *led += co * f;
        } else {
            // leftmost pixel
            let f = (xi + 1) as f32 - low;
            let led = &mut self.leds[xi as usize];
            if mode == FillMode::Replace {
                *led = led.scaled(1.0 - f);
            }
            *led += co * f;

            // middle pixels, if any
            for k in (xi + 1)..ei {
                let led = &mut self.leds[k as usize];
                match mode {
                    FillMode::Replace => *led = co,
                    FillMode::Add => *led += co,
                }
            }

            // rightmost pixel
            let f = high - ei as f32;
            if f > 0.0 {
                let led = &mut self.leds[ei as usize];
                if mode == FillMode::Replace {
                    *led = led.scaled(1.0 - f);
                }
                *led += co * f;
            }
        }
    }

    /// Like [`fill_range`](Self::fill_range) but the coordinate space
    /// wraps modulo the strip length, offset by the ring zero point.
    /// Always additive.
    pub fn fill_range_ring(&mut self, low: f32, high: f32, co: LedColor<C>) {
        let low = low + self.ring_zero as f32;
        let high = high + self.ring_zero as f32;
        let count = self.leds.len() as i32;
        if count == 0 {
            return;
        }

        let xi = floorf(low) as i32;
        let ei = floorf(high) as i32;

        if xi == ei {
            // only one LED lit
            let f = high - low;
            self.leds[umod(xi, count) as usize] += co * f;
        } else {
            // leftmost pixel
            let f = (xi + 1) as f32 - low;
            self.leds[umod(xi, count) as usize] += co * f;

            // middle pixels, if any
            for k in (xi + 1)..ei {
                self.leds[umod(k, count) as usize] += co;
            }

            // rightmost pixel
            let f = high - ei as f32;
            self.leds[umod(ei, count) as usize] += co * f;
        }
    }

    /// Additive ring fill of a width starting at a fractional position.
    pub fn draw(&mut self, x: f32, w: f32, co: LedColor<C>) {
        self.fill_range_ring(x, x + w, co);
    }

    /// Gradient fill from `co0` at `low` to `co1` at `high`.
    ///
    /// Each touched pixel samples the gradient at its center, or at the
    /// coverage-weighted center for the partial boundary pixels. A
    /// backwards range swaps bounds and colors together.
    pub fn fill_range_gradient(
        &mut self,
        mut low: f32,
        mut high: f32,
        mut co0: LedColor<C>,
        mut co1: LedColor<C>,
        replace: bool,
    ) {
        if low > high {
            core::mem::swap(&mut low, &mut high);
            core::mem::swap(&mut co0, &mut co1);
        }
        let mode = if replace { FillMode::Replace } else { FillMode::Add };
        self.fill_range_gradient_m(low, high, co0, co1, mode, false);
    }

    /// Ring variant of [`fill_range_gradient`](Self::fill_range_gradient),
    /// wrapped modulo the strip length and offset by the ring zero point.
    pub fn fill_range_ring_gradient(
        &mut self,
        mut low: f32,
        mut high: f32,
        mut co0: LedColor<C>,
        mut co1: LedColor<C>,
        replace: bool,
    ) {
        if low > high {
            core::mem::swap(&mut low, &mut high);
            core::mem::swap(&mut co0, &mut co1);
        }
        low += self.ring_zero as f32;
        high += self.ring_zero as f32;
        let mode = if replace { FillMode::Replace } else { FillMode::Add };
        self.fill_range_gradient_m(low, high, co0, co1, mode, true);
    }

    fn fill_range_gradient_m(
        &mut self,
        mut low: f32,
        mut high: f32,
        co0: LedColor<C>,
        co1: LedColor<C>,
        mode: FillMode,
        ring: bool,
    ) {
        let count = self.leds.len() as i32;
        if count == 0 {
            return;
        }
        if !ring {
            if low >= count as f32 || high <= 0.0 {
                return;
            }
            low = low.max(0.0);
            high = high.min(count as f32);
        }

        let xi = floorf(low) as i32;
        let ei = floorf(high) as i32;

        let index = |k: i32| {
            if ring {
                umod(k, count) as usize
            } else {
                k as usize
            }
        };

        if xi == ei {
            // only one LED lit, use the middle of the gradient
            let f = high - low;
            let led = &mut self.leds[index(xi)];
            if mode == FillMode::Replace {
                *led = led.scaled(1.0 - f);
            }
            *led += co0.mix(co1, 0.5) * f;
        } else {
            // each pixel samples the gradient at the center of its
            // covered portion, mapped into the [low, high) span

            // leftmost partial or full pixel: coverage hangs off the
            // right edge, so its center sits f/2 back from there
            let f = (xi + 1) as f32 - low;
            let span_x = map_range((xi + 1) as f32 - f / 2.0, low, high, 0.0, 1.0);
            let led = &mut self.leds[index(xi)];
            if mode == FillMode::Replace {
                *led = led.scaled(1.0 - f);
            }
            *led += co0.mix(co1, span_x) * f;

            // middle pixels, if any
            for k in (xi + 1)..ei {
                let span_x = map_range(k as f32 + 0.5, low, high, 0.0, 1.0);
                let co = co0.mix(co1, span_x);
                let led = &mut self.leds[index(k)];
                match mode {
                    FillMode::Replace => *led = co,
                    FillMode::Add => *led += co,
                }
            }

            // rightmost pixel
            let f = high - ei as f32;
            if f > 0.0 {
                let span_x = map_range(ei as f32 + f / 2.0, low, high, 0.0, 1.0);
                let led = &mut self.leds[index(ei)];
                if mode == FillMode::Replace {
                    *led = led.scaled(1.0 - f);
                }
                *led += co0.mix(co1, span_x) * f;
            }
        }
    }

    /// Approximate current draw of the whole frame, at 20mA per
    /// full-scale channel.
    pub fn milliamps(&self) -> u32 {
        let mut t: u64 = 0;
        for led in &self.leds {
            t += u64::from(led.r.to_u32()) + u64::from(led.g.to_u32()) + u64::from(led.b.to_u32());
        }
        (t * 20 / u64::from(C::MAX)) as u32
    }

    /// Set the milliamp budget enforced by
    /// [`apply_milliamp_limit`](Self::apply_milliamp_limit). Zero
    /// disables limiting.
    pub const fn limit_milliamps(&mut self, ma_limit: u32) {
        self.ma_limit = ma_limit;
    }

    /// If the frame would draw over the budget, dim every pixel by the
    /// same ratio. Uniform scaling, so hues hold.
    pub fn apply_milliamp_limit(&mut self) {
        if self.ma_limit > 1 {
            let ma = self.milliamps();
            if ma > self.ma_limit {
                let t = self.ma_limit as f32 / ma as f32;
                for led in &mut self.leds {
                    *led = *led * t;
                }
            }
        }
    }
}
