//! Bounded command intake for the pattern manager.
//!
//! Button ISRs, web handlers or schedulers run outside the render loop;
//! they enqueue [`PatternCommand`]s through a critical-section guarded
//! queue and the manager drains it at the top of a frame. Sends to a
//! full queue fail with the command handed back, never blocking.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::Deque;

use crate::color::{ColorChannel, LedColor};
use crate::manager::PatternManager;

/// A host-side request the manager applies between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCommand {
    /// Switch patterns with a visual crossfade.
    SetPattern { index: usize, fade_ms: u32 },
    /// Edit one integer (or checkbox) parameter of the current pattern.
    SetParamInt { param: usize, value: i32 },
    /// Edit one color parameter of the current pattern, as packed hex.
    SetParamColor { param: usize, hex: u32 },
    /// Press or release an action parameter of the current pattern.
    Action { param: usize, pressed: bool },
    MidiKey { pitch: u8, velocity: u8 },
    MidiControl { control: u8, value: u8 },
    MidiPanic,
}

/// Error returned when the queue is full; carries the rejected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub PatternCommand);

/// Fixed-capacity command queue, safe to share with interrupt context.
pub struct CommandQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<PatternCommand, N>>>,
}

impl<const N: usize> CommandQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// A lightweight enqueue handle to hand to event sources.
    pub const fn sender(&self) -> CommandSender<'_, N> {
        CommandSender { queue: self }
    }

    pub fn try_send(&self, command: PatternCommand) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(QueueFull)
        })
    }

    pub fn try_receive(&self) -> Option<PatternCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable enqueue handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const N: usize> {
    queue: &'a CommandQueue<N>,
}

impl<const N: usize> CommandSender<'_, N> {
    pub fn try_send(&self, command: PatternCommand) -> Result<(), QueueFull> {
        self.queue.try_send(command)
    }
}

impl<C: ColorChannel> PatternManager<C> {
    /// Drain every pending command and apply it. Non-blocking; call
    /// once per frame before [`tick`](PatternManager::tick).
    pub fn process_commands<const N: usize>(&mut self, queue: &CommandQueue<N>) {
        while let Some(command) = queue.try_receive() {
            self.apply_command(command);
        }
    }

    /// Apply one command with the engine's usual no-throw semantics:
    /// anything referring to a missing pattern or parameter does
    /// nothing.
    pub fn apply_command(&mut self, command: PatternCommand) {
        match command {
            PatternCommand::SetPattern { index, fade_ms } => {
                self.set_pattern(index, Duration::from_millis(u64::from(fade_ms)));
            }
            PatternCommand::SetParamInt { param, value } => {
                if let Some(slot) = self.current_pattern_mut() {
                    slot.set_param_int(param, value);
                }
            }
            PatternCommand::SetParamColor { param, hex } => {
                if let Some(slot) = self.current_pattern_mut() {
                    slot.set_param_color(param, LedColor::from_hex(hex));
                }
            }
            PatternCommand::Action { param, pressed } => {
                if let Some(slot) = self.current_pattern_mut() {
                    slot.do_action(param, pressed);
                }
            }
            PatternCommand::MidiKey { pitch, velocity } => self.midi_key(pitch, velocity),
            PatternCommand::MidiControl { control, value } => self.midi_control(control, value),
            PatternCommand::MidiPanic => self.midi_panic(),
        }
    }
}
