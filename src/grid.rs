//! 2-D addressing over a borrowed [`LedStrip`].
//!
//! The grid owns no pixels; it maps `(x, y)` coordinates onto strip
//! indices, row-major by default or through an injected finder for
//! sparse physical layouts. Every lookup that lands outside the strip
//! is a no-op. Wrap behavior per axis is a compile-time choice, like
//! everything else about a fixed installation.

use libm::floorf;

use crate::color::{ColorChannel, LedColor};
use crate::math::{pin_range, umod_f};
use crate::strip::LedStrip;

/// Maps a grid coordinate to a strip index, or `None` for "no such
/// pixel" on non-rectangular layouts.
pub type PixelFinder = fn(x: i32, y: i32) -> Option<usize>;

/// Rectangular view over a strip. `WRAP_X`/`WRAP_Y` select wraparound
/// per axis for [`fill`](Self::fill).
pub struct LedGrid<'a, C: ColorChannel, const WRAP_X: bool = false, const WRAP_Y: bool = false> {
    strip: &'a mut LedStrip<C>,
    width: u16,
    height: u16,
    pixel_finder: Option<PixelFinder>,
}

impl<'a, C: ColorChannel, const WRAP_X: bool, const WRAP_Y: bool>
    LedGrid<'a, C, WRAP_X, WRAP_Y>
{
    /// Simplest arrangement: left to right, top to bottom, by `width`.
    ///
    /// A zero `height` is derived from the strip length.
    pub fn new(strip: &'a mut LedStrip<C>, width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = if height == 0 {
            strip.len().div_ceil(usize::from(width)) as u16
        } else {
            height
        };
        Self {
            strip,
            width,
            height,
            pixel_finder: None,
        }
    }

    /// Install a custom coordinate mapping for sparse layouts.
    pub fn set_pixel_finder(&mut self, pixel_finder: PixelFinder) {
        self.pixel_finder = Some(pixel_finder);
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Resolve a coordinate to a strip index, if there is a pixel there.
    pub fn led_index(&self, x: i32, y: i32) -> Option<usize> {
        if let Some(finder) = self.pixel_finder {
            return finder(x, y);
        }

        if x < 0 || x >= i32::from(self.width) || y < 0 {
            return None;
        }
        let ix = i32::from(self.width) * y + x;
        let ix = ix as usize;
        if ix >= self.strip.len() {
            return None;
        }
        Some(ix)
    }

    /// Set one whole pixel; silently does nothing off-grid.
    pub fn set_led(&mut self, co: LedColor<C>, x: i32, y: i32) {
        if let Some(ix) = self.led_index(x, y) {
            self.strip.set_led(ix, co);
        }
    }

    pub fn clear(&mut self) {
        self.strip.clear();
    }

    pub fn clear_color(&mut self, co: LedColor<C>) {
        self.strip.fill(co);
    }

    /// Additively fill `[x0, x1)` of row `y` with horizontal sub-pixel
    /// coverage, one index lookup per cell.
    pub fn fill_row(&mut self, co: LedColor<C>, y: i32, mut x0: f32, mut x1: f32) {
        let width = f32::from(self.width);
        if x0 >= width || x1 <= 0.0 {
            return;
        }
        x0 = x0.max(0.0);
        x1 = x1.min(width);

        let xi = floorf(x0) as i32;
        let ei = floorf(x1) as i32;

        if xi == ei {
            // only one LED lit
            if let Some(ix) = self.led_index(xi, y) {
                let f = x1 - x0;
                if let Some(led) = self.strip.leds_mut().get_mut(ix) {
                    *led += co * f;
                }
            }
        } else {
            // leftmost pixel
            if let Some(ix) = self.led_index(xi, y) {
                let f = (xi + 1) as f32 - x0;
                if let Some(led) = self.strip.leds_mut().get_mut(ix) {
                    *led += co * f;
                }
            }

            // middle pixels, if any
            for k in (xi + 1)..ei {
                if let Some(ix) = self.led_index(k, y) {
                    if let Some(led) = self.strip.leds_mut().get_mut(ix) {
                        *led += co;
                    }
                }
            }

            // rightmost pixel
            let f = x1 - ei as f32;
            if f > 0.0 {
                if let Some(ix) = self.led_index(ei, y) {
                    if let Some(led) = self.strip.leds_mut().get_mut(ix) {
                        *led += co * f;
                    }
                }
            }
        }
    }

    /// Fill a non-wrapping rectangle, decomposed into per-row fills
    /// with vertical coverage weighting. A rectangle whose edges come
    /// in wrapped order splits into up to two straight pieces first.
    fn fill2(&mut self, co: LedColor<C>, x0: f32, y0: f32, x1: f32, y1: f32) {
        if x0 > x1 {
            self.fill2(co, 0.0, y0, x1, y1);
            self.fill2(co, x0, y0, f32::from(self.width), y1);
            return;
        }

        if y0 > y1 {
            self.fill2(co, x0, 0.0, x1, y1);
            self.fill2(co, x0, y0, x1, f32::from(self.height));
            return;
        }

        let y0i = floorf(y0) as i32;
        let y1i = floorf(y1) as i32;

        if y0i == y1i {
            // only one LED row lit
            let f = y1 - y0;
            self.fill_row(co * f, y0i, x0, x1);
        } else {
            // topmost row
            let f = (y0i + 1) as f32 - y0;
            self.fill_row(co * f, y0i, x0, x1);

            // middle rows, if any
            for k in (y0i + 1)..y1i {
                self.fill_row(co, k, x0, x1);
            }

            // bottom pixel row
            let f = y1 - y1i as f32;
            self.fill_row(co * f, y1i, x0, x1);
        }
    }

    /// Additively fill the rectangle `[x0, x1) x [y0, y1)` with
    /// sub-pixel coverage on all four edges.
    ///
    /// Each axis either wraps modulo its extent (when configured
    /// wrapping) or clamps, swapping a backwards pair.
    pub fn fill(&mut self, co: LedColor<C>, mut x0: f32, mut y0: f32, mut x1: f32, mut y1: f32) {
        let width = f32::from(self.width);
        let height = f32::from(self.height);

        if WRAP_X {
            x0 = umod_f(x0, width);
            x1 = umod_f(x1, width);
        } else {
            x0 = pin_range(x0, 0.0, width);
            x1 = pin_range(x1, 0.0, width);
            if x0 > x1 {
                core::mem::swap(&mut x0, &mut x1);
            }
        }

        if WRAP_Y {
            y0 = umod_f(y0, height);
            y1 = umod_f(y1, height);
        } else {
            y0 = pin_range(y0, 0.0, height);
            y1 = pin_range(y1, 0.0, height);
            if y0 > y1 {
                core::mem::swap(&mut y0, &mut y1);
            }
        }

        self.fill2(co, x0, y0, x1, y1);
    }
}
