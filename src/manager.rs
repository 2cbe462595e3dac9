//! Owns the pattern registry and drives the active pattern each frame,
//! switching between patterns with timed crossfades.
//!
//! Two crossfade modes: a visual blend (both patterns tick into
//! separate buffers and the outputs mix linearly over time) and a
//! parameter morph (the live pattern's parameter values interpolate
//! from a snapshot toward explicit targets while it keeps rendering).
//! Starting a new switch mid-crossfade supersedes the old one
//! immediately; nothing queues.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{ColorChannel, LedColor};
use crate::math::map_range;
use crate::param::ParamKind;
use crate::pattern::{Pattern, PatternSlot};
use crate::strip::LedStrip;

/// Snapshot capacity for morphable parameters; any past this many are
/// set immediately instead of morphed.
pub const CROSSFADE_PARAM_MAX: usize = 12;

const HISTORY_SIZE: usize = 20;

type ParamSnapshot = heapless::Vec<u32, CROSSFADE_PARAM_MAX>;

/// Frame-rate report averaged over the recent tick history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceInfo {
    pub ms_per_frame: u32,
    pub frames_per_second: u32,
}

enum Crossfade {
    Idle,
    /// Old and new patterns render independently; outputs blend by time.
    Visual {
        previous: Option<usize>,
        elapsed: Duration,
        total: Duration,
    },
    /// The live pattern renders alone with interpolated parameters.
    Morph {
        first: usize,
        start: ParamSnapshot,
        target: ParamSnapshot,
        elapsed: Duration,
        total: Duration,
    },
}

/// Registry and scheduler for [`Pattern`]s.
pub struct PatternManager<C: ColorChannel> {
    led_count: usize,
    patterns: Vec<PatternSlot<C>>,
    current: Option<usize>,
    crossfade: Crossfade,
    // blend buffer for visual crossfades, reused between them
    scratch: Option<LedStrip<C>>,
    ms_history: [u32; HISTORY_SIZE],
    ms_history_ix: usize,
}

impl<C: ColorChannel> Default for PatternManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColorChannel> PatternManager<C> {
    pub fn new() -> Self {
        Self {
            led_count: 0,
            patterns: Vec::new(),
            current: None,
            crossfade: Crossfade::Idle,
            scratch: None,
            ms_history: [0; HISTORY_SIZE],
            ms_history_ix: 0,
        }
    }

    /// Register a pattern. Its index is its registration order.
    pub fn add_pattern(&mut self, pattern: impl Pattern<C> + 'static) {
        self.add_boxed(Box::new(pattern));
    }

    pub fn add_boxed(&mut self, pattern: Box<dyn Pattern<C>>) {
        self.patterns.push(PatternSlot::new(pattern));
    }

    /// Initialize every registered pattern for a strip length and reset
    /// the frame-rate history.
    pub fn init_patterns(&mut self, led_count: usize) {
        self.led_count = led_count;
        for slot in &mut self.patterns {
            slot.init(led_count);
            slot.midi_panic();
        }
        self.ms_history = [0; HISTORY_SIZE];
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn pattern(&self, ix: usize) -> Option<&PatternSlot<C>> {
        self.patterns.get(ix)
    }

    pub fn pattern_mut(&mut self, ix: usize) -> Option<&mut PatternSlot<C>> {
        self.patterns.get_mut(ix)
    }

    /// Linear lookup by pattern name.
    pub fn pattern_index(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.name() == name)
    }

    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_pattern(&self) -> Option<&PatternSlot<C>> {
        self.patterns.get(self.current?)
    }

    pub fn current_pattern_mut(&mut self) -> Option<&mut PatternSlot<C>> {
        self.patterns.get_mut(self.current?)
    }

    pub const fn is_crossfading(&self) -> bool {
        !matches!(self.crossfade, Crossfade::Idle)
    }

    /// Switch to a pattern, crossfading visually over `fade`.
    pub fn set_pattern(&mut self, ix: usize, fade: Duration) {
        self.set_pattern_with_params(ix, 0, &[], fade);
    }

    /// Switch to a pattern with explicit target parameter values.
    ///
    /// Switching to a different pattern sets the targets immediately
    /// and blends visually. Re-selecting the current pattern morphs its
    /// live parameter values toward the targets instead (only the first
    /// [`CROSSFADE_PARAM_MAX`] are morphed). A zero `fade` applies
    /// everything immediately. Either way any crossfade already running
    /// is superseded on the spot.
    pub fn set_pattern_with_params(
        &mut self,
        next_ix: usize,
        first: usize,
        targets: &[u32],
        fade: Duration,
    ) {
        if self.patterns.is_empty() {
            return;
        }
        let next_ix = if next_ix >= self.patterns.len() {
            0
        } else {
            next_ix
        };

        let target: ParamSnapshot = targets.iter().copied().take(CROSSFADE_PARAM_MAX).collect();
        let immediate = fade.as_millis() == 0;

        if self.current == Some(next_ix) && !target.is_empty() {
            if immediate {
                self.patterns[next_ix].set_params(first, &target);
                self.crossfade = Crossfade::Idle;
                return;
            }
            let mut start = ParamSnapshot::new();
            start.resize_default(target.len()).ok();
            self.patterns[next_ix].get_params(first, &mut start);
            // any targets past the snapshot capacity land right away
            if targets.len() > CROSSFADE_PARAM_MAX {
                self.patterns[next_ix]
                    .set_params(first + CROSSFADE_PARAM_MAX, &targets[CROSSFADE_PARAM_MAX..]);
            }
            self.crossfade = Crossfade::Morph {
                first,
                start,
                target,
                elapsed: Duration::from_millis(0),
                total: fade,
            };
            return;
        }

        // different pattern (or none yet): targets apply up front, the
        // transition is purely visual
        if !targets.is_empty() {
            self.patterns[next_ix].set_params(first, targets);
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "pattern -> {} ({}ms fade)",
            self.patterns[next_ix].name(),
            fade.as_millis()
        );

        let previous = self.current;
        self.current = Some(next_ix);
        self.crossfade = if immediate {
            Crossfade::Idle
        } else {
            Crossfade::Visual {
                previous,
                elapsed: Duration::from_millis(0),
                total: fade,
            }
        };
    }

    /// Save current parameter values into a flat array. While a morph
    /// is running this reports the targets, not the partly faded
    /// in-between values.
    pub fn get_params(&self, first: usize, out: &mut [u32]) {
        out.fill(0);
        if let Crossfade::Morph {
            first: morph_first,
            target,
            ..
        } = &self.crossfade
        {
            for (ix, slot) in out.iter_mut().enumerate() {
                let k = ix + first;
                if k >= *morph_first && k < morph_first + target.len() {
                    *slot = target[k - morph_first];
                }
            }
        } else if let Some(cix) = self.current {
            self.patterns[cix].get_params(first, out);
        }
    }

    /// Advance one frame into `strip`.
    pub fn tick(&mut self, delta: Duration, strip: &mut LedStrip<C>) {
        self.tick_stats(delta);

        let state = core::mem::replace(&mut self.crossfade, Crossfade::Idle);
        match state {
            Crossfade::Idle => self.tick_into(delta, strip, self.current),
            Crossfade::Visual {
                previous,
                mut elapsed,
                total,
            } => {
                elapsed += delta;
                if elapsed >= total {
                    // arrived; the new pattern stands alone
                    self.tick_into(delta, strip, self.current);
                    return;
                }

                let reuse = self
                    .scratch
                    .take()
                    .filter(|s| s.len() == self.led_count);
                let mut scratch = reuse.unwrap_or_else(|| LedStrip::new(self.led_count));
                scratch.set_ring_zero(strip.ring_zero());

                let t = elapsed.as_millis() as f32 / total.as_millis() as f32;
                self.tick_into(delta, strip, self.current);
                self.tick_into(delta, &mut scratch, previous);
                strip.scale(t);
                scratch.scale(1.0 - t);
                strip.add(&scratch);

                self.scratch = Some(scratch);
                self.crossfade = Crossfade::Visual {
                    previous,
                    elapsed,
                    total,
                };
            }
            Crossfade::Morph {
                first,
                start,
                target,
                mut elapsed,
                total,
            } => {
                elapsed += delta;
                if elapsed >= total {
                    // arrived: force-set the exact targets so no
                    // interpolation rounding survives
                    if let Some(cix) = self.current {
                        self.patterns[cix].set_params(first, &target);
                    }
                    self.tick_into(delta, strip, self.current);
                    return;
                }

                let fraction = elapsed.as_millis() as f32 / total.as_millis() as f32;
                if let Some(cix) = self.current {
                    let slot = &mut self.patterns[cix];
                    for (k, (&v0, &v)) in start.iter().zip(target.iter()).enumerate() {
                        let ix = first + k;
                        match slot.param_kind(ix) {
                            Some(ParamKind::Int) => {
                                let value =
                                    map_range(fraction, 0.0, 1.0, v0 as f32, v as f32) + 0.5;
                                slot.set_param_int(ix, value as i32);
                            }
                            Some(ParamKind::Color) => {
                                let co0 = LedColor::<C>::from_hex(v0);
                                let co1 = LedColor::<C>::from_hex(v);
                                let chan = |a: C, b: C| {
                                    map_range(fraction, 0.0, 1.0, a.to_u32() as f32, b.to_u32() as f32)
                                        as u32
                                };
                                slot.set_param_color(
                                    ix,
                                    LedColor::from_rgb(
                                        chan(co0.r, co1.r),
                                        chan(co0.g, co1.g),
                                        chan(co0.b, co1.b),
                                    ),
                                );
                            }
                            _ => {}
                        }
                    }
                }
                // and before we go, tick the actual pattern for pixels
                self.tick_into(delta, strip, self.current);
                self.crossfade = Crossfade::Morph {
                    first,
                    start,
                    target,
                    elapsed,
                    total,
                };
            }
        }
    }

    fn tick_into(&mut self, delta: Duration, strip: &mut LedStrip<C>, ix: Option<usize>) {
        match ix.and_then(|ix| self.patterns.get_mut(ix)) {
            Some(slot) => slot.tick(delta, strip),
            None => strip.clear(),
        }
    }

    /// Fold a frame delta into the rate history. Separate from `tick`
    /// so a host that bypasses the patterns can still feed it.
    pub fn tick_stats(&mut self, delta: Duration) {
        self.ms_history_ix = (self.ms_history_ix + 1) % HISTORY_SIZE;
        self.ms_history[self.ms_history_ix] = delta.as_millis() as u32;
    }

    /// Average the recent tick history into ms-per-frame and fps.
    /// A sub-1ms average reads as 1ms.
    pub fn performance_info(&self) -> PerformanceInfo {
        let mut avg = self.ms_history.iter().map(|&ms| ms as f32).sum::<f32>()
            / HISTORY_SIZE as f32;
        if avg < 1.0 {
            avg = 1.0;
        }
        PerformanceInfo {
            ms_per_frame: (avg + 0.5) as u32,
            frames_per_second: (1000.0 / avg + 0.5) as u32,
        }
    }

    pub fn midi_key(&mut self, pitch: u8, velocity: u8) {
        if let Some(slot) = self.current_pattern_mut() {
            slot.midi_key(pitch, velocity);
        }
    }

    pub fn midi_control(&mut self, control: u8, value: u8) {
        if let Some(slot) = self.current_pattern_mut() {
            slot.midi_control(control, value);
        }
    }

    /// All notes off, for the current pattern.
    pub fn midi_panic(&mut self) {
        if let Some(slot) = self.current_pattern_mut() {
            slot.midi_panic();
        }
    }
}
