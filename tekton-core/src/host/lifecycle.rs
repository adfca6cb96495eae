//! Build lifecycle transitions
//!
//! Start/stop notifications arrive as queued commands and are invoked
//! by the command executor when they reach the head of the queue;
//! cancel and pause come from the host or the board UI.

use super::{Host, CANCEL_NOTIFY_GUARD, RESET_GUARD};
use crate::eeprom_map;
use crate::state::{BuildState, HeaterPolicy, HostState};
use crate::traits::{
    Board, CommandQueue, Eeprom, HostLink, MotionController, Storage, StorageError, ToolBus,
};

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
    /// A build-start notification reached the head of the queue;
    /// `name` yields the NUL-terminated build name that follows it
    pub fn build_start_notification<I: IntoIterator<Item = u8>>(&mut self, name: I) {
        let mut bytes = name.into_iter();
        match self.host_state {
            HostState::BuildingFromSd => {
                // Name already set by the playback command; discard
                for byte in bytes.by_ref() {
                    if byte == 0 {
                        break;
                    }
                }
            }
            HostState::Ready => {
                self.host_state = HostState::Building;
                // then read the name exactly as a repeated
                // notification mid-build would
                self.read_build_name(&mut bytes);
            }
            HostState::Building => self.read_build_name(&mut bytes),
            HostState::CancelBuild => {}
        }
        let now = self.board.now();
        self.board.reset_elapsed_seconds();
        self.print_time.start(now);
        self.queue.clear_line_number();
        self.build_state = BuildState::Running;
    }

    /// A build-stop notification reached the head of the queue
    ///
    /// Finalizes only once the last scheduled copy has completed;
    /// earlier notifications are copy boundaries and leave state
    /// untouched so the executor can start the next copy.
    pub fn build_stop_notification(&mut self) {
        let copies = self.queue.copies_to_print();
        if copies == 0 || self.queue.copies_printed() >= copies - 1 {
            let now = self.board.now();
            self.print_time.stop(now);
            self.last_print_line = self.queue.line_number();
            self.queue.pause_heaters(HeaterPolicy::ALL_OFF);
            self.build_state = BuildState::FinishedNormally;
            self.host_state = HostState::Ready;
        }
    }

    /// Cancel the current build via the pause-first protocol
    ///
    /// Motion is aborted immediately, but the cancel completes through
    /// a pause so the tool is withdrawn from the part first; the tick
    /// function finalizes once the executor confirms paused.
    pub fn stop_build(&mut self) {
        self.build_state = BuildState::Cancelling;

        self.motion.abort();

        if self.queue.is_paused() || self.queue.pause_state().is_intermediate() {
            self.stop_build_now();
        } else {
            self.queue.request_pause(true, HeaterPolicy::KEEP_HEATING);
        }
    }

    /// Finalize a cancel: record state, schedule the deferred reset
    pub fn stop_build_now(&mut self) {
        let now = self.board.now();
        if self.host_state == HostState::Building {
            // Building from the host stream: the host gets one
            // CANCEL_BUILD response before the board resets, bounded
            // by the notify guard in case it stopped listening
            self.host_state = HostState::CancelBuild;
            self.pending_cancel.guard.start(now, CANCEL_NOTIFY_GUARD);
            self.pending_cancel.notify_owed = true;
        }
        self.last_print_line = self.queue.line_number();
        self.print_time.stop(now);
        self.pending_reset.requested = true;
        self.pending_reset.guard.start(now, RESET_GUARD);
        self.build_state = BuildState::Canceled;
    }

    /// Pause or resume the build with the given heater treatment
    ///
    /// Ignored when the executor already matches the requested state
    /// or is mid-transition from an earlier request.
    pub fn pause_build(&mut self, pause: bool, heaters: HeaterPolicy) {
        if pause == self.queue.is_paused() {
            return;
        }
        if self.queue.pause_state().is_intermediate() {
            return;
        }

        self.queue.request_pause(pause, heaters);
        let now = self.board.now();
        if pause {
            self.build_state = BuildState::Paused;
            self.print_time.pause(now, true);
        } else {
            self.build_state = BuildState::Running;
            self.print_time.pause(now, false);
        }
    }

    /// Begin a build from removable storage
    ///
    /// With `name` None the stored build name is played back (the
    /// playback command has already set it).
    pub fn start_build_from_sd(&mut self, name: Option<&[u8]>) -> Result<(), StorageError> {
        if let Some(name) = name {
            self.set_build_name(name);
        }

        match self.storage.start_playback(&self.build_name) {
            // Naming a directory just changes directory; no build
            Err(StorageError::ChangedWorkingDir) => return Ok(()),
            Err(e) => return Err(e),
            Ok(()) => {}
        }

        self.queue.reset();
        self.motion.reset();
        self.motion.abort();

        // After queue reset, so the counter survives it
        let copies = self
            .eeprom
            .read_u8(eeprom_map::COPIES_TO_PRINT, eeprom_map::DEFAULT_COPIES_TO_PRINT);
        self.queue.set_copies_to_print(copies);
        self.host_state = HostState::BuildingFromSd;

        Ok(())
    }

    /// Clear build context; used by the power-on reset path
    pub fn reset_build(&mut self) {
        self.machine_name.clear();
        self.build_name.clear();
        self.host_state = HostState::Ready;
    }

    /// Nothing queued and nothing left to play back
    pub fn is_build_complete(&self) -> bool {
        self.queue.is_empty() && !self.storage.playback_has_next()
    }

    /// Shared name-copy step for the Ready and Building start arms
    fn read_build_name<I: Iterator<Item = u8>>(&mut self, bytes: &mut I) {
        self.build_name.clear();
        for byte in bytes {
            if byte == 0 || self.build_name.push(byte).is_err() {
                break;
            }
        }
    }

    /// Copy a possibly unterminated name into the build name buffer
    pub(super) fn set_build_name(&mut self, name: &[u8]) {
        self.build_name.clear();
        for &byte in name {
            if byte == 0 || self.build_name.push(byte).is_err() {
                break;
            }
        }
    }
}
