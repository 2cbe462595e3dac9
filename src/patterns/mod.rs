//! A few small concrete patterns.
//!
//! These are worked examples of the [`Pattern`](crate::pattern::Pattern)
//! contract, not a decorative library: one static fill, one moving dot,
//! one hue sweep. Installations register their own alongside these.

mod chase;
mod rainbow;
mod solid;

pub use chase::ChasePattern;
pub use rainbow::RainbowPattern;
pub use solid::SolidPattern;
