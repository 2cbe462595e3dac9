//! 24-bit web-hex import/export, with optional gamma correction.
//!
//! Gamma is an explicit value handed in by the caller rather than a
//! process-wide setting, so two strips with different corrections can
//! coexist.

use libm::powf;

use super::{ColorChannel, LedColor};

/// Gamma curve for hex import/export. Stores the inverse so export
/// doesn't divide every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGamma {
    gamma: f32,
    inverse: f32,
}

impl HexGamma {
    pub fn new(gamma: f32) -> Self {
        Self {
            gamma,
            inverse: 1.0 / gamma,
        }
    }

    pub const fn gamma(self) -> f32 {
        self.gamma
    }

    pub const fn inverse(self) -> f32 {
        self.inverse
    }
}

impl Default for HexGamma {
    /// Identity curve; hex round trips are exact.
    fn default() -> Self {
        Self {
            gamma: 1.0,
            inverse: 1.0,
        }
    }
}

impl<C: ColorChannel> LedColor<C> {
    /// Decode a `0x00RRGGBB` word with no gamma correction.
    ///
    /// Exact inverse of [`to_hex`](Self::to_hex) at 8-bit precision.
    pub fn from_hex(hex: u32) -> Self {
        let chan = |v: u32| C::from_u32(v * C::MAX / 255);
        Self {
            r: chan((hex >> 16) & 0xff),
            g: chan((hex >> 8) & 0xff),
            b: chan(hex & 0xff),
        }
    }

    /// Encode as a `0x00RRGGBB` word with no gamma correction.
    ///
    /// At 16-bit depth only the top 8 bits of each channel survive.
    pub fn to_hex(self) -> u32 {
        let chan = |v: C| (v.to_u32() * 255 + C::MAX / 2) / C::MAX;
        (chan(self.r) << 16) | (chan(self.g) << 8) | chan(self.b)
    }

    /// Decode a `0x00RRGGBB` word through a gamma curve.
    pub fn from_hex_gamma(hex: u32, gamma: HexGamma) -> Self {
        let chan = |v: u32| {
            let f = v as f32 / 255.0;
            C::from_u32((powf(f, gamma.gamma) * C::MAX as f32) as u32)
        };
        Self {
            r: chan((hex >> 16) & 0xff),
            g: chan((hex >> 8) & 0xff),
            b: chan(hex & 0xff),
        }
    }

    /// Encode as a `0x00RRGGBB` word through a gamma curve.
    pub fn to_hex_gamma(self, gamma: HexGamma) -> u32 {
        let chan = |v: C| {
            let f = v.to_u32() as f32 / C::MAX as f32;
            (powf(f, gamma.inverse) * 255.0 + 0.5) as u32
        };
        (chan(self.r) << 16) | (chan(self.g) << 8) | chan(self.b)
    }
}
