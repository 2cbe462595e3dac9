//! The stateful animation unit and its lifecycle.
//!
//! A [`Pattern`] declares parameters once in `inner_init`, then renders
//! one frame per `inner_tick`. The engine-side bookkeeping (run clock,
//! dirty flag, parameter storage) lives in [`PatternSlot`], so concrete
//! patterns stay small: creative math in, pixels out.

use alloc::boxed::Box;

use embassy_time::Duration;

use crate::color::{ColorChannel, LedColor};
use crate::param::{ParamKind, ParamSet};
use crate::strip::LedStrip;

/// Deltas above this are treated as a stall, not animation time.
const DELTA_STALL: Duration = Duration::from_millis(500);
/// What a stalled frame is clamped down to.
const DELTA_STALL_REPLACEMENT: Duration = Duration::from_millis(100);

/// Engine-owned state every pattern shares.
#[derive(Debug)]
pub struct PatternContext<C: ColorChannel> {
    /// Pixel count, assigned once at init.
    pub led_count: usize,
    /// Accumulated run clock.
    pub total: Duration,
    /// The pattern's declared parameters.
    pub params: ParamSet<C>,
}

impl<C: ColorChannel> Default for PatternContext<C> {
    fn default() -> Self {
        Self {
            led_count: 0,
            total: Duration::from_millis(0),
            params: ParamSet::new(),
        }
    }
}

/// A self-contained animation generator.
///
/// `inner_init` declares the parameter list (its insertion order is the
/// persisted layout, so keep it stable); `inner_tick` is where all the
/// per-pattern creative logic lives. A pattern never fails: bad input
/// degrades to nothing visible this frame.
pub trait Pattern<C: ColorChannel> {
    fn name(&self) -> &'static str;

    /// Declare parameters and derived state. Runs once per `init`.
    fn inner_init(&mut self, ctx: &mut PatternContext<C>);

    /// React to an edited parameter, e.g. recompute cached colors.
    fn inner_changed(&mut self, _ctx: &mut PatternContext<C>) {}

    /// Advance by `delta` and render into the (already cleared) strip.
    fn inner_tick(&mut self, delta: Duration, ctx: &mut PatternContext<C>, strip: &mut LedStrip<C>);

    /// Handle an action parameter press or release.
    fn inner_do_action(&mut self, _ix: usize, _pressed: bool) {}

    /// Capability bits; bit 3 means "supports MIDI".
    fn flags(&self) -> u16 {
        0
    }

    fn midi_key(&mut self, _pitch: u8, _velocity: u8) {}

    fn midi_control(&mut self, _control: u8, _value: u8) {}

    /// All notes off.
    fn midi_panic(&mut self) {}
}

/// A registered pattern plus its engine-side context.
pub struct PatternSlot<C: ColorChannel> {
    pattern: Box<dyn Pattern<C>>,
    ctx: PatternContext<C>,
}

impl<C: ColorChannel> PatternSlot<C> {
    pub fn new(pattern: Box<dyn Pattern<C>>) -> Self {
        Self {
            pattern,
            ctx: PatternContext::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.pattern.name()
    }

    pub fn flags(&self) -> u16 {
        self.pattern.flags()
    }

    pub const fn led_count(&self) -> usize {
        self.ctx.led_count
    }

    pub const fn total(&self) -> Duration {
        self.ctx.total
    }

    /// (Re)initialize: resets the run clock and rebuilds the parameter
    /// list from scratch.
    pub fn init(&mut self, led_count: usize) {
        self.ctx.led_count = led_count;
        self.ctx.total = Duration::from_millis(0);
        self.ctx.params.reset();
        self.pattern.inner_init(&mut self.ctx);
    }

    /// Advance one frame into `strip`.
    ///
    /// Anomalously large deltas (a stall, not animation) are clamped so
    /// pattern physics can't blow up on a single frame. The strip is
    /// cleared before the pattern draws, and a pending parameter change
    /// fires `inner_changed` exactly once.
    pub fn tick(&mut self, mut delta: Duration, strip: &mut LedStrip<C>) {
        if delta > DELTA_STALL {
            delta = DELTA_STALL_REPLACEMENT;
        }
        self.ctx.total += delta;
        strip.clear();
        if self.ctx.params.take_changed() {
            self.pattern.inner_changed(&mut self.ctx);
        }
        self.pattern.inner_tick(delta, &mut self.ctx, strip);
    }

    pub fn params(&self) -> &ParamSet<C> {
        &self.ctx.params
    }

    pub fn param_kind(&self, ix: usize) -> Option<ParamKind> {
        self.ctx.params.kind(ix)
    }

    pub fn param_int(&self, ix: usize) -> i32 {
        self.ctx.params.value_int(ix)
    }

    pub fn param_color(&self, ix: usize) -> LedColor<C> {
        self.ctx.params.value_color(ix)
    }

    pub fn set_param_int(&mut self, ix: usize, v: i32) {
        self.ctx.params.set_int(ix, v);
    }

    pub fn set_param_color(&mut self, ix: usize, co: LedColor<C>) {
        self.ctx.params.set_color(ix, co);
    }

    /// Save a parameter range into a flat array, for persistence or a
    /// crossfade snapshot.
    pub fn get_params(&self, first: usize, out: &mut [u32]) {
        self.ctx.params.read(first, out);
    }

    /// Restore a parameter range from a flat array.
    pub fn set_params(&mut self, first: usize, values: &[u32]) {
        self.ctx.params.write(first, values);
    }

    /// Dispatch an action press/release; unknown indices do nothing.
    pub fn do_action(&mut self, ix: usize, pressed: bool) {
        if ix < self.ctx.params.len() {
            self.pattern.inner_do_action(ix, pressed);
        }
    }

    pub fn midi_key(&mut self, pitch: u8, velocity: u8) {
        self.pattern.midi_key(pitch, velocity);
    }

    pub fn midi_control(&mut self, control: u8, value: u8) {
        self.pattern.midi_control(control, value);
    }

    pub fn midi_panic(&mut self) {
        self.pattern.midi_panic();
    }
}
