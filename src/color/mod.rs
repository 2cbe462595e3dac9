//! Fixed-point RGB color parameterized by channel depth.
//!
//! [`LedColor`] is a plain value type over an unsigned channel; [`Led8`]
//! and [`Led16`] are the two depths real hardware uses. Arithmetic is
//! saturating throughout so layered light sources clamp instead of
//! wrapping.

mod hex;
mod hsv;
mod pack;

pub use hex::HexGamma;
pub use pack::PackRegimes;

use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use smart_leds::RGB8;

/// One color channel: an unsigned integer with a fixed full-scale value.
pub trait ColorChannel:
    Copy + Default + PartialEq + PartialOrd + core::fmt::Debug + 'static
{
    /// Full-scale channel value (255 or 65535).
    const MAX: u32;

    fn from_u32(v: u32) -> Self;
    fn to_u32(self) -> u32;
}

impl ColorChannel for u8 {
    const MAX: u32 = 255;

    #[inline]
    fn from_u32(v: u32) -> Self {
        // the inherent u8::MAX would shadow the trait const here
        v.min(<Self as ColorChannel>::MAX) as Self
    }

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl ColorChannel for u16 {
    const MAX: u32 = 65535;

    #[inline]
    fn from_u32(v: u32) -> Self {
        v.min(<Self as ColorChannel>::MAX) as Self
    }

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

/// An RGB triple with channels in `[0, C::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedColor<C: ColorChannel> {
    pub r: C,
    pub g: C,
    pub b: C,
}

/// 8-bit-per-channel color (WS2812-class strips).
pub type Led8 = LedColor<u8>;
/// 16-bit-per-channel color (SK9822/APA102-class strips).
pub type Led16 = LedColor<u16>;

impl<C: ColorChannel> LedColor<C> {
    pub fn new(r: C, g: C, b: C) -> Self {
        Self { r, g, b }
    }

    /// Construct from raw channel magnitudes, clamped to full scale.
    pub fn from_rgb(r: u32, g: u32, b: u32) -> Self {
        Self {
            r: C::from_u32(r),
            g: C::from_u32(g),
            b: C::from_u32(b),
        }
    }

    /// The largest channel value.
    pub fn brightness(self) -> u32 {
        self.r.to_u32().max(self.g.to_u32()).max(self.b.to_u32())
    }

    /// Linear interpolation toward `other`.
    ///
    /// `f` is the fraction of `other`: 0.0 keeps `self`, 1.0 is all
    /// `other`. Channels round to nearest.
    pub fn mix(self, other: Self, f: f32) -> Self {
        let f1 = 1.0 - f;
        let lerp = |a: C, b: C| {
            let v = a.to_u32() as f32 * f1 + b.to_u32() as f32 * f + 0.5;
            C::from_u32(v as u32)
        };
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }

    /// Brightness scale with round-to-nearest, clamped to full scale.
    pub fn scaled(self, n: f32) -> Self {
        let scale = |v: C| C::from_u32((v.to_u32() as f32 * n + 0.5) as u32);
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Convert to another channel depth.
    ///
    /// Widening replicates full scale exactly (0xff becomes 0xffff);
    /// narrowing truncates on bucket boundaries.
    pub fn convert<D: ColorChannel>(self) -> LedColor<D> {
        let conv = |v: C| {
            let v = u64::from(v.to_u32());
            let out = if D::MAX >= C::MAX {
                v * u64::from(D::MAX) / u64::from(C::MAX)
            } else {
                v * (u64::from(D::MAX) + 1) / (u64::from(C::MAX) + 1)
            };
            D::from_u32(out as u32)
        };
        LedColor {
            r: conv(self.r),
            g: conv(self.g),
            b: conv(self.b),
        }
    }

    pub fn to_led8(self) -> Led8 {
        self.convert()
    }

    pub fn to_led16(self) -> Led16 {
        self.convert()
    }
}

impl<C: ColorChannel> AddAssign for LedColor<C> {
    /// Saturating per-channel add; clamps at full scale.
    fn add_assign(&mut self, other: Self) {
        let sat = |a: C, b: C| C::from_u32((a.to_u32() + b.to_u32()).min(C::MAX));
        self.r = sat(self.r, other.r);
        self.g = sat(self.g, other.g);
        self.b = sat(self.b, other.b);
    }
}

impl<C: ColorChannel> Add for LedColor<C> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<C: ColorChannel> SubAssign for LedColor<C> {
    /// Saturating per-channel subtract; clamps at zero.
    fn sub_assign(&mut self, other: Self) {
        let sat = |a: C, b: C| C::from_u32(a.to_u32().saturating_sub(b.to_u32()));
        self.r = sat(self.r, other.r);
        self.g = sat(self.g, other.g);
        self.b = sat(self.b, other.b);
    }
}

impl<C: ColorChannel> Sub for LedColor<C> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl<C: ColorChannel> Mul<f32> for LedColor<C> {
    type Output = Self;

    /// Brightness scale, truncating toward zero.
    fn mul(self, n: f32) -> Self {
        let scale = |v: C| C::from_u32((v.to_u32() as f32 * n) as u32);
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl<C: ColorChannel> MulAssign<f32> for LedColor<C> {
    fn mul_assign(&mut self, n: f32) {
        *self = *self * n;
    }
}

impl<C: ColorChannel> Mul for LedColor<C> {
    type Output = Self;

    /// Per-channel product scaled by full scale; used for tinting.
    fn mul(self, other: Self) -> Self {
        let tint = |a: C, b: C| {
            let v = u64::from(a.to_u32()) * u64::from(b.to_u32()) / u64::from(C::MAX);
            C::from_u32(v as u32)
        };
        Self {
            r: tint(self.r, other.r),
            g: tint(self.g, other.g),
            b: tint(self.b, other.b),
        }
    }
}

impl<C: ColorChannel> MulAssign for LedColor<C> {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl<C: ColorChannel> From<LedColor<C>> for RGB8 {
    fn from(co: LedColor<C>) -> Self {
        let led8 = co.to_led8();
        RGB8 {
            r: led8.r,
            g: led8.g,
            b: led8.b,
        }
    }
}

impl<C: ColorChannel> From<RGB8> for LedColor<C> {
    fn from(co: RGB8) -> Self {
        Led8::new(co.r, co.g, co.b).convert()
    }
}
