//! Stepper motion executor interface
//!
//! Position advances from the stepper timer interrupt; a consistent
//! multi-axis snapshot requires reading inside a critical section.

/// Axes on the wire: x, y, z, a, b
pub const AXIS_COUNT: usize = 5;

pub trait MotionController {
    /// Current stepper position, in steps per axis
    fn position(&self) -> [i32; AXIS_COUNT];

    /// Endstop status bits, two per axis (max, min), x lowest
    fn endstop_status(&self) -> u8;

    /// Halt in-flight motion immediately
    fn abort(&mut self);

    /// Reset planner state (new build)
    fn reset(&mut self);

    /// A move is currently executing
    fn is_running(&self) -> bool;
}
