//! Deferred reset sequencing
//!
//! A reset request never executes while a response is still being
//! transmitted: the host must see the acknowledgement first. The guard
//! timeout forces the reset through anyway when the host has stopped
//! draining the line.

use super::{Host, RESET_GUARD};
use crate::timeout::Timeout;
use crate::traits::{Board, CommandQueue, Eeprom, HostLink, MotionController, Storage, ToolBus};

/// A reset waiting for the outbound response to drain
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingReset {
    pub(super) requested: bool,
    pub(super) hard: bool,
    pub(super) guard: Timeout,
}

/// A CANCEL_BUILD notification owed to the host
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingCancel {
    pub(super) notify_owed: bool,
    pub(super) guard: Timeout,
}

impl<L, Q, M, T, F, E, B> Host<L, Q, M, T, F, E, B>
where
    L: HostLink,
    Q: CommandQueue,
    M: MotionController,
    T: ToolBus,
    F: Storage,
    E: Eeprom,
    B: Board,
{
    /// Schedule a reset for after the current response has been sent
    ///
    /// A hard reset also replays the startup indication and clears
    /// latched heater faults board-side.
    pub fn request_reset(&mut self, hard: bool) {
        let now = self.board.now();
        self.pending_reset.requested = true;
        self.pending_reset.hard |= hard;
        self.pending_reset.guard.start(now, RESET_GUARD);
    }

    /// Execute the pending reset and clear transient state
    pub(super) fn perform_reset(&mut self) {
        if self.build_state.is_active() {
            self.stop_build();
        }
        self.pending_reset.requested = false;

        self.board.reset(self.pending_reset.hard);
        self.pending_reset.hard = false;
        self.packet_in_timeout.abort();

        self.reset_build();
    }
}
