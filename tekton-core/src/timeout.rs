//! Countdown deadline primitive
//!
//! No background timer: callers arm a deadline and poll it against the
//! monotonic clock supplied by the board. Firing is a pure predicate,
//! not an event.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the board's monotonic microsecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instant(pub u64);

impl Instant {
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn since(self, earlier: Instant) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

/// A span of time in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration(pub u64);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    pub const fn as_micros(self) -> u64 {
        self.0
    }

    pub const fn as_minutes(self) -> u64 {
        self.0 / 60_000_000
    }
}

/// One countdown: inactive, or armed with a deadline
///
/// Supports freezing via [`Timeout::pause`], used by print-time
/// accounting while a build is paused.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeout {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    started_at: Instant,
    duration: Duration,
    /// When frozen, the instant the freeze began
    paused_at: Option<Instant>,
}

impl Timeout {
    /// Create an inactive timeout
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arm with a duration measured from `now`
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.armed = Some(Armed {
            started_at: now,
            duration,
            paused_at: None,
        });
    }

    /// Disarm; `has_elapsed` becomes false
    pub fn abort(&mut self) {
        self.armed = None;
    }

    pub fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    /// True once the armed duration has passed; false while inactive
    pub fn has_elapsed(&self, now: Instant) -> bool {
        match self.armed {
            Some(armed) => armed.elapsed(now) >= armed.duration,
            None => false,
        }
    }

    /// Time accumulated since arming, excluding frozen spans;
    /// zero while inactive
    pub fn current_elapsed(&self, now: Instant) -> Duration {
        match self.armed {
            Some(armed) => armed.elapsed(now),
            None => Duration::ZERO,
        }
    }

    /// Freeze or unfreeze elapsed accounting
    ///
    /// While frozen the deadline does not approach. Unfreezing shifts
    /// the start forward by the frozen span so the remaining time is
    /// preserved. No-op while inactive or already in the target state.
    pub fn pause(&mut self, now: Instant, pause: bool) {
        let Some(armed) = self.armed.as_mut() else {
            return;
        };
        match (armed.paused_at, pause) {
            (None, true) => armed.paused_at = Some(now),
            (Some(paused_at), false) => {
                armed.started_at.0 += now.since(paused_at).0;
                armed.paused_at = None;
            }
            _ => {}
        }
    }
}

impl Armed {
    fn elapsed(&self, now: Instant) -> Duration {
        match self.paused_at {
            Some(paused_at) => paused_at.since(self.started_at),
            None => now.since(self.started_at),
        }
    }
}
