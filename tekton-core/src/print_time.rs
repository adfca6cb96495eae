//! Elapsed print time accounting
//!
//! Hours are counted by re-arming a one-hour timeout each time it
//! fires; minutes are always derived from the in-flight sub-hour
//! timeout and never stored. Precision is bounded by the host loop
//! frequency, which is plenty for build statistics.

use crate::timeout::{Duration, Instant, Timeout};

const ONE_HOUR: Duration = Duration::from_micros(3_600_000_000);

/// Tracks the running build's elapsed time, and the finished build's
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintTimeTracker {
    hours: u8,
    current_hour: Timeout,
    last_hours: u8,
    last_minutes: u8,
}

impl PrintTimeTracker {
    pub const fn new() -> Self {
        Self {
            hours: 0,
            current_hour: Timeout::new(),
            last_hours: 0,
            last_minutes: 0,
        }
    }

    /// Begin counting from zero
    pub fn start(&mut self, now: Instant) {
        self.current_hour.start(now, ONE_HOUR);
        self.hours = 0;
    }

    /// Stop counting, remembering the final reading
    pub fn stop(&mut self, now: Instant) {
        let (hours, minutes) = self.elapsed(now);
        self.last_hours = hours;
        self.last_minutes = minutes;
        self.current_hour = Timeout::new();
        self.hours = 0;
    }

    /// Roll the hour counter; called once per scheduler tick
    pub fn tick(&mut self, now: Instant) {
        if self.current_hour.has_elapsed(now) {
            self.current_hour.start(now, ONE_HOUR);
            self.hours += 1;
        }
    }

    /// Freeze or unfreeze the clock together with a build pause
    pub fn pause(&mut self, now: Instant, pause: bool) {
        self.current_hour.pause(now, pause);
    }

    /// Hours and minutes since the start of the print
    pub fn elapsed(&self, now: Instant) -> (u8, u8) {
        let minutes = self.current_hour.current_elapsed(now).as_minutes();
        (self.hours, minutes as u8)
    }

    /// Final reading of the last stopped print
    pub fn last(&self) -> (u8, u8) {
        (self.last_hours, self.last_minutes)
    }
}
