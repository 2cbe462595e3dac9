//! One dot chasing around the strip.

use embassy_time::Duration;

use crate::color::{ColorChannel, LedColor};
use crate::math::{migrate_f, umod_f};
use crate::pattern::{Pattern, PatternContext};
use crate::strip::LedStrip;

const PARAM_COLOR: usize = 0;
const PARAM_RATE: usize = 1;
const PARAM_RESET: usize = 2;

/// A single pixel-wide dot moving at a parameterized rate, wrapping
/// around the strip as a ring. Holding the action parameter eases the
/// dot back to the start at the same rate.
#[derive(Debug, Default)]
pub struct ChasePattern<C: ColorChannel> {
    position: f32,
    pressed: bool,
    _marker: core::marker::PhantomData<C>,
}

impl<C: ColorChannel> ChasePattern<C> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ColorChannel> Pattern<C> for ChasePattern<C> {
    fn name(&self) -> &'static str {
        "chase"
    }

    fn inner_init(&mut self, ctx: &mut PatternContext<C>) {
        ctx.params
            .add_color("color", LedColor::from_rgb(C::MAX / 2, C::MAX / 4, C::MAX / 4));
        // pixels per second
        ctx.params.add_int("rate", 10);
        ctx.params.add_action("reset");
        self.position = 0.0;
        self.pressed = false;
    }

    fn inner_tick(
        &mut self,
        delta: Duration,
        ctx: &mut PatternContext<C>,
        strip: &mut LedStrip<C>,
    ) {
        let rate = ctx.params.value_int(PARAM_RATE) as f32;
        let color = ctx.params.value_color(PARAM_COLOR);

        let step = delta.as_millis() as f32 * rate / 1000.0;
        if self.pressed {
            self.position = migrate_f(self.position, 0.0, step);
        } else {
            self.position += step;
        }
        if ctx.led_count > 0 {
            self.position = umod_f(self.position, ctx.led_count as f32);
        }

        strip.fill_range_ring(self.position, self.position + 1.0, color);
    }

    fn inner_do_action(&mut self, ix: usize, pressed: bool) {
        if ix == PARAM_RESET {
            self.pressed = pressed;
        }
    }
}
