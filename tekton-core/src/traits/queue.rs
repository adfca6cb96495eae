//! Command queue interface
//!
//! The queue stores raw action-packet bytes; the command executor
//! drains it from the motion timer interrupt. Capacity checks and
//! pushes are therefore only meaningful inside a critical section,
//! which the dispatcher provides around the whole check-then-copy.

use crate::state::{HeaterPolicy, PauseState};

/// The packet did not fit in the remaining queue capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

pub trait CommandQueue {
    /// Bytes of free space
    fn remaining_capacity(&self) -> usize;

    /// Append one byte; caller has already verified capacity
    fn push(&mut self, byte: u8);

    /// Drop all queued commands
    fn reset(&mut self);

    fn is_empty(&self) -> bool;

    /// Ask the executor to pause or resume, with the given heater
    /// treatment; the transition completes over later ticks
    fn request_pause(&mut self, pause: bool, heaters: HeaterPolicy);

    /// Where the executor is in a pause/resume transition
    fn pause_state(&self) -> PauseState;

    fn is_paused(&self) -> bool {
        self.pause_state().is_paused()
    }

    /// Shut heaters off without pausing motion (end of build)
    fn pause_heaters(&mut self, heaters: HeaterPolicy);

    /// Host line number of the command currently executing
    fn line_number(&self) -> u32;

    fn clear_line_number(&mut self);

    /// Copies scheduled for this build; 0 means unbounded/one-shot
    fn copies_to_print(&self) -> u8;

    /// Copies completed so far
    fn copies_printed(&self) -> u8;

    fn set_copies_to_print(&mut self, copies: u8);
}
