//! Board-level services
//!
//! The monotonic clock, the error indicator (LED/buzzer pattern per
//! named condition), and the board reset entry points.

use crate::timeout::Instant;

/// Named conditions surfaced on the board's error indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorIndicator {
    /// Inbound host packet fault (timeout, CRC, noise, oversize)
    HostPacketFault,
    /// Host sent a truncated command payload
    HostTruncatedCmd,
    /// Tool bus lock could not be acquired in time
    ToolLockTimeout,
    /// Build cancelled board-side
    CancelBuild,
    /// Reset was requested while a build was active
    ResetDuringBuild,
}

pub trait Board {
    /// Monotonic clock; never goes backwards
    fn now(&self) -> Instant;

    /// Surface a named error condition to the operator
    fn indicate_error(&mut self, error: ErrorIndicator);

    /// Reset the board. A hard reset also replays the startup
    /// indication and clears latched heater faults.
    fn reset(&mut self, hard: bool);

    /// Zero the board's elapsed-seconds counter (new build)
    fn reset_elapsed_seconds(&mut self);
}
