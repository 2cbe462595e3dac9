//! Hardware frame-word packing for SPI strips with a global-brightness
//! field (SK9822/APA102 style).

use super::{Led8, Led16};

/// Regime thresholds for 16-bit packing.
///
/// The driver chip carries a 5-bit global brightness multiplier; picking
/// between 31/31, 5/31 and 1/31 of full scale by the largest channel
/// keeps dynamic range in the dim end. The defaults are the full-scale
/// fractions (`MAX * 5 / 31` and `MAX * 1 / 31`) tuned against one
/// chipset's response; other hardware may want different bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackRegimes {
    /// Below this, use the 5/31 brightness multiplier.
    pub mid: u16,
    /// Below this, use the 1/31 brightness multiplier.
    pub low: u16,
}

impl Default for PackRegimes {
    fn default() -> Self {
        // 5/31 * 0xffff -> 10570.16, 1/31 * 0xffff -> 2114.03
        Self {
            mid: 10570,
            low: 2114,
        }
    }
}

impl Led8 {
    /// Pack into a 32-bit frame word at full global brightness.
    pub fn pack(self) -> u32 {
        0xff00_0000
            | u32::from(self.r)
            | (u32::from(self.g) << 8)
            | (u32::from(self.b) << 16)
    }
}

impl Led16 {
    /// Pack into a 32-bit frame word with the default regime bands.
    pub fn pack(self) -> u32 {
        self.pack_with(PackRegimes::default())
    }

    /// Pack into a 32-bit frame word, choosing one of three brightness
    /// regimes by the largest channel value.
    pub fn pack_with(self, regimes: PackRegimes) -> u32 {
        // cheap estimate of the max component
        let max_component = self.r | self.g | self.b;

        if max_component >= regimes.mid {
            // brightness 31, channels used directly
            0xff00_0000
                | u32::from(self.r >> 8)
                | u32::from(self.g & 0xff00)
                | ((u32::from(self.b) & 0xff00) << 8)
        } else if max_component >= regimes.low {
            // brightness 5, channels scaled up
            let rr = u32::from(self.r) * 31 / 5;
            let gg = u32::from(self.g) * 31 / 5;
            let bb = u32::from(self.b) * 31 / 5;
            0xe500_0000 | (rr >> 8) | (gg & 0xff00) | ((bb & 0xff00) << 8)
        } else {
            // dimmest regime, brightness 1
            let rr = u32::from(self.r) * 31;
            let gg = u32::from(self.g) * 31;
            let bb = u32::from(self.b) * 31;
            0xe100_0000 | (rr >> 8) | (gg & 0xff00) | ((bb & 0xff00) << 8)
        }
    }
}
