//! Pattern engine for addressable LED strips and grids.
//!
//! The pieces, leaf to root: [`LedColor`] (fixed-point RGB at 8- or
//! 16-bit depth), [`LedStrip`] (an owned frame buffer with sub-pixel
//! antialiased fills), [`LedGrid`] (2-D addressing over a borrowed
//! strip), the [`Pattern`] trait (a stateful animation unit with typed,
//! introspectable parameters) and [`PatternManager`] (registry,
//! tick scheduling, crossfades between patterns or between parameter
//! value sets).
//!
//! The engine is single-threaded and tick-driven: the host loop calls
//! `manager.tick(delta, &mut strip)` once per frame and hands the
//! finished strip to an [`OutputDriver`]. Nothing in here blocks,
//! panics on bad input, or touches a clock.

#![no_std]

extern crate alloc;

pub mod color;
pub mod command;
pub mod grid;
pub mod manager;
pub mod math;
pub mod param;
pub mod pattern;
pub mod patterns;
pub mod strip;

pub use color::{ColorChannel, HexGamma, Led8, Led16, LedColor, PackRegimes};
pub use command::{CommandQueue, CommandSender, PatternCommand, QueueFull};
pub use grid::{LedGrid, PixelFinder};
pub use manager::{CROSSFADE_PARAM_MAX, PatternManager, PerformanceInfo};
pub use param::{Param, ParamKind, ParamSet, ParamValue};
pub use pattern::{Pattern, PatternContext, PatternSlot};
pub use strip::LedStrip;

pub use embassy_time::Duration;

/// Abstract LED driver trait.
///
/// Implement this to push finished frames to hardware; the protocol
/// encoding is the driver's business. The strip handed in has already
/// had its milliamp limiter applied.
pub trait OutputDriver<C: ColorChannel> {
    /// Write the strip's pixels out to the physical LEDs.
    fn write(&mut self, strip: &LedStrip<C>);
}
