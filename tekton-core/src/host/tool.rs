//! Master/slave exchange with the tool-head subsystem
//!
//! Both operations here stall the whole tick for their duration: the
//! lock acquisition is bounded at 50 ms, and the completion poll is
//! bounded by the bus scheduler's own response deadline. Callers
//! budget for the stall; converting this to anything non-blocking
//! would change the timing the rest of the system depends on.

use tekton_protocol::commands::SLAVE_CMD_PAUSE_UNPAUSE;
use tekton_protocol::{Response, ResponseCode, TransportError};

use super::Host;
use crate::timeout::{Duration, Timeout};
use crate::traits::{
    Board, CommandQueue, Eeprom, ErrorIndicator, HostLink, MotionController, Storage, ToolBus,
};

/// Bound on spinning for the tool bus lock
const TOOL_LOCK_TIMEOUT: Duration = Duration::from_millis(50);

/// Largest request this core forwards onto the tool bus
pub(super) const MAX_TOOL_REQUEST: usize = 32;

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
    /// Toggle pause on the current tool head
    pub(super) fn tool_pause(&mut self, response: &mut Response) {
        if !self.acquire_tool_lock(response) {
            return;
        }
        let request = [self.tool.current_toolhead(), SLAVE_CMD_PAUSE_UNPAUSE];
        self.run_tool_transaction(&request, response);
    }

    /// Spin for the bus lock, up to the fixed bound; on expiry report
    /// a downstream timeout and give up without retrying
    pub(super) fn acquire_tool_lock(&mut self, response: &mut Response) -> bool {
        let mut lock_timeout = Timeout::new();
        lock_timeout.start(self.board.now(), TOOL_LOCK_TIMEOUT);
        while !self.tool.try_lock() {
            if lock_timeout.has_elapsed(self.board.now()) {
                response.code(ResponseCode::DownstreamTimeout);
                self.board.indicate_error(ErrorIndicator::ToolLockTimeout);
                return false;
            }
        }
        true
    }

    /// Run one request/response exchange and copy the result back
    ///
    /// Caller holds the bus lock. The lock is released as soon as the
    /// transaction has started so other bus users are not starved for
    /// the duration of the exchange.
    pub(super) fn run_tool_transaction(&mut self, request: &[u8], response: &mut Response) {
        self.tool.start_transaction(request);
        self.tool.release_lock();

        // Bounded: the bus scheduler enforces its own response
        // deadline, so no timeout check is needed on this loop
        while !self.tool.transaction_done() {
            self.tool.run_bus_tick();
        }

        if self.tool.response_error() == Some(TransportError::Timeout) {
            response.code(ResponseCode::DownstreamTimeout);
        } else {
            // Verbatim copy-back, the tool's own status byte included
            response.append_bytes(self.tool.response_payload());
        }
    }
}
