//! Host and build state machines
//!
//! Two independent axes, jointly constrained: `HostState` tracks what
//! the communication layer is doing, `BuildState` tracks the status of
//! the current or last finished print. Both are mutated only by the
//! lifecycle controller and the reset path.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the host link is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HostState {
    /// Idle; accepting new work
    Ready,
    /// Streaming a build from the host
    Building,
    /// Playing a build back from removable storage
    BuildingFromSd,
    /// Host-streamed build cancelled board-side; the host still has to
    /// be told via a one-time CANCEL_BUILD response
    CancelBuild,
}

/// Status of the current or last finished print
///
/// Reported verbatim in the build-stats query, so the wire encoding
/// is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BuildState {
    None = 0,
    Running = 1,
    FinishedNormally = 2,
    Paused = 3,
    Canceled = 4,
    /// Cancel requested; waiting for the pause-first protocol to
    /// complete before finalizing
    Cancelling = 5,
}

impl BuildState {
    /// True while a print is in progress (paused counts)
    pub fn is_active(self) -> bool {
        matches!(self, BuildState::Running | BuildState::Paused)
    }
}

/// Where the command executor is in a pause or resume transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseState {
    NotPaused,
    /// Pause requested, withdrawal moves still executing
    Pausing,
    Paused,
    /// Resume requested, re-entry moves still executing
    Resuming,
}

impl PauseState {
    /// True while a pause or resume is mid-transition
    pub fn is_intermediate(self) -> bool {
        matches!(self, PauseState::Pausing | PauseState::Resuming)
    }

    pub fn is_paused(self) -> bool {
        self == PauseState::Paused
    }
}

/// Which heaters the command executor shuts off when pausing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaterPolicy {
    pub extruder_off: bool,
    pub platform_off: bool,
}

impl HeaterPolicy {
    /// Shut everything off (cancel, end of build)
    pub const ALL_OFF: HeaterPolicy = HeaterPolicy {
        extruder_off: true,
        platform_off: true,
    };

    /// Leave heaters running across the pause
    pub const KEEP_HEATING: HeaterPolicy = HeaterPolicy {
        extruder_off: false,
        platform_off: false,
    };
}

/// Check the joint constraint between the two state axes
///
/// Used by tests to assert that no operation sequence produces a
/// combination outside the transition tables.
pub fn states_consistent(host: HostState, build: BuildState) -> bool {
    match build {
        // Cancelling only happens while a build source is active
        BuildState::Cancelling => matches!(
            host,
            HostState::Building | HostState::BuildingFromSd
        ),
        // A live print implies a live source
        BuildState::Running | BuildState::Paused => matches!(
            host,
            HostState::Building | HostState::BuildingFromSd
        ),
        // Terminal and idle build states pair with any host state:
        // Canceled coexists with CancelBuild while the notification
        // is owed, and with Ready afterwards
        BuildState::None | BuildState::Canceled | BuildState::FinishedNormally => true,
    }
}
