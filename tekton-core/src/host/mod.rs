//! The host controller
//!
//! One owned context struct pairs the packet dispatcher with the build
//! lifecycle logic: all mutable controller state lives here and is
//! only ever touched from the tick function. Collaborators are owned
//! generically so the whole controller runs against mocks on the host.
//!
//! Sub-modules split the controller by concern:
//! - [`dispatch`]: the per-tick entry point and action-packet routing
//! - [`queries`]: the query opcode handler table
//! - [`lifecycle`]: build start/stop/pause/cancel transitions
//! - [`tool`]: the master/slave exchange with the tool head
//! - [`reset`]: deferred soft/hard reset sequencing

mod dispatch;
mod lifecycle;
mod queries;
mod reset;
mod tool;


use heapless::Vec;

use crate::eeprom_map;
use crate::print_time::PrintTimeTracker;
use crate::state::{BuildState, HostState};
use crate::timeout::{Duration, Timeout};
use crate::traits::{
    Board, CommandQueue, Eeprom, HostLink, MotionController, Storage, ToolBus, MAX_FILE_NAME,
};

pub use reset::{PendingCancel, PendingReset};

/// Deadline from the first byte of an inbound packet until reception
/// is abandoned
const PACKET_RX_TIMEOUT: Duration = Duration::from_millis(200);

/// How long a scheduled reset waits for the in-flight response to
/// drain before firing anyway (host presumed down)
const RESET_GUARD: Duration = Duration::from_millis(200);

/// How long the board waits for the host to pick up the CANCEL_BUILD
/// notification before resetting anyway
const CANCEL_NOTIFY_GUARD: Duration = Duration::from_millis(1_000);

/// Host communication and build lifecycle controller
///
/// `run_tick` must be called once per scheduler iteration; everything
/// else is either a query handler invoked from it or a lifecycle
/// operation invoked by the command executor and the board UI.
pub struct Host<L, Q, M, T, F, E, B> {
    pub link: L,
    pub queue: Q,
    pub motion: M,
    pub tool: T,
    pub storage: F,
    pub eeprom: E,
    pub board: B,

    host_state: HostState,
    build_state: BuildState,
    /// Loaded lazily from EEPROM on first read
    machine_name: Vec<u8, { eeprom_map::MACHINE_NAME_LEN }>,
    build_name: Vec<u8, MAX_FILE_NAME>,
    /// Host line number of the last finished or cancelled build
    last_print_line: u32,
    print_time: PrintTimeTracker,
    packet_in_timeout: Timeout,
    pending_reset: PendingReset,
    pending_cancel: PendingCancel,
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
    pub fn new(link: L, queue: Q, motion: M, tool: T, storage: F, eeprom: E, board: B) -> Self {
        Self {
            link,
            queue,
            motion,
            tool,
            storage,
            eeprom,
            board,
            host_state: HostState::Ready,
            build_state: BuildState::None,
            machine_name: Vec::new(),
            build_name: Vec::new(),
            last_print_line: 0,
            print_time: PrintTimeTracker::new(),
            packet_in_timeout: Timeout::new(),
            pending_reset: PendingReset::default(),
            pending_cancel: PendingCancel::default(),
        }
    }

    pub fn host_state(&self) -> HostState {
        self.host_state
    }

    pub fn build_state(&self) -> BuildState {
        self.build_state
    }

    /// Name of the current or last build, empty when none
    pub fn build_name(&self) -> &[u8] {
        &self.build_name
    }

    /// Host line number of the last finished or cancelled build
    pub fn last_print_line(&self) -> u32 {
        self.last_print_line
    }

    pub fn print_time(&self) -> &PrintTimeTracker {
        &self.print_time
    }

    /// The user-visible machine name, loaded from EEPROM on first use
    ///
    /// Old host versions stored the name without a terminator when it
    /// filled the block, so the stored bytes cannot be assumed
    /// NUL-terminated.
    pub fn machine_name(&mut self) -> &[u8] {
        if self.machine_name.is_empty() {
            let mut stored = [0xFFu8; eeprom_map::MACHINE_NAME_LEN];
            self.eeprom.read_block(eeprom_map::MACHINE_NAME, &mut stored);
            for &byte in stored.iter() {
                if byte == 0 || byte == 0xFF {
                    break;
                }
                let _ = self.machine_name.push(byte);
            }
        }
        if self.machine_name.is_empty() {
            let _ = self
                .machine_name
                .extend_from_slice(eeprom_map::FALLBACK_MACHINE_NAME);
        }
        &self.machine_name
    }
}
