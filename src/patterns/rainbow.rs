//! Hue sweep across the strip.

use embassy_time::Duration;

use crate::color::{ColorChannel, LedColor};
use crate::math::pin_range_i;
use crate::pattern::{Pattern, PatternContext};
use crate::strip::LedStrip;

const PARAM_SPEED: usize = 0;
const PARAM_SATURATION: usize = 1;

/// The full hue circle laid across the strip, rotating at a
/// parameterized number of cycles per minute.
#[derive(Debug, Default)]
pub struct RainbowPattern<C: ColorChannel> {
    saturation: C,
}

impl<C: ColorChannel> RainbowPattern<C> {
    pub fn new() -> Self {
        Self {
            saturation: C::from_u32(C::MAX),
        }
    }
}

impl<C: ColorChannel> Pattern<C> for RainbowPattern<C> {
    fn name(&self) -> &'static str {
        "rainbow"
    }

    fn inner_init(&mut self, ctx: &mut PatternContext<C>) {
        // hue cycles per minute
        ctx.params.add_int("speed", 10);
        // percent
        ctx.params.add_int("saturation", 100);
    }

    fn inner_changed(&mut self, ctx: &mut PatternContext<C>) {
        let percent = pin_range_i(ctx.params.value_int(PARAM_SATURATION), 0, 100) as u32;
        self.saturation = C::from_u32(percent * C::MAX / 100);
    }

    fn inner_tick(
        &mut self,
        _delta: Duration,
        ctx: &mut PatternContext<C>,
        strip: &mut LedStrip<C>,
    ) {
        if ctx.led_count == 0 {
            return;
        }
        let speed = ctx.params.value_int(PARAM_SPEED).max(0) as u64;
        let max = u64::from(C::MAX);
        // hue offset from the run clock, wrapped onto the hue circle
        let offset = ctx.total.as_millis() * speed * (max + 1) / 60_000;

        let count = strip.len();
        let full = C::from_u32(C::MAX);
        for ix in 0..count {
            let hue = (ix as u64 * (max + 1) / count as u64 + offset) % (max + 1);
            let co = LedColor::hsv(C::from_u32(hue.min(max) as u32), self.saturation, full);
            strip.set_led(ix, co);
        }
    }
}
