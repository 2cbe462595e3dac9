//! Whole-strip solid color.

use embassy_time::Duration;

use crate::color::{ColorChannel, LedColor};
use crate::pattern::{Pattern, PatternContext};
use crate::strip::LedStrip;

const PARAM_COLOR: usize = 0;

/// Fills every pixel with one color parameter.
#[derive(Debug, Default)]
pub struct SolidPattern<C: ColorChannel> {
    // cached on parameter change so the tick stays a plain fill
    color: LedColor<C>,
}

impl<C: ColorChannel> SolidPattern<C> {
    pub fn new() -> Self {
        Self {
            color: LedColor::default(),
        }
    }
}

impl<C: ColorChannel> Pattern<C> for SolidPattern<C> {
    fn name(&self) -> &'static str {
        "solid"
    }

    fn inner_init(&mut self, ctx: &mut PatternContext<C>) {
        ctx.params
            .add_color("color", LedColor::from_rgb(C::MAX / 2, C::MAX / 4, C::MAX / 4));
    }

    fn inner_changed(&mut self, ctx: &mut PatternContext<C>) {
        self.color = ctx.params.value_color(PARAM_COLOR);
    }

    fn inner_tick(
        &mut self,
        _delta: Duration,
        _ctx: &mut PatternContext<C>,
        strip: &mut LedStrip<C>,
    ) {
        strip.fill(self.color);
    }
}
