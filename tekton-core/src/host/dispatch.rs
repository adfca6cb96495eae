//! Per-tick packet dispatch
//!
//! Invoked once per scheduler iteration. Ordering matters: cancel
//! finalization, outbound back-pressure, deferred reset, receive
//! timeout housekeeping, then packet classification. Never starts new
//! work while a response is still transmitting.

use tekton_protocol::{is_action_opcode, Response, ResponseCode, TransportError};

use super::{Host, PACKET_RX_TIMEOUT};
use crate::state::{BuildState, HostState};
use crate::traits::{
    Board, CommandQueue, Eeprom, ErrorIndicator, HostLink, MotionController, QueueFull, Storage,
    ToolBus,
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
    /// One scheduler tick of host processing
    pub fn run_tick(&mut self) {
        let now = self.board.now();

        // A cancel in progress finalizes once the executor confirms
        // the withdrawal pause has completed
        if self.build_state == BuildState::Cancelling && self.queue.pause_state().is_paused() {
            self.stop_build_now();
        }

        // Back-pressure: while a response is draining, do nothing,
        // unless an overdue reset must be forced through
        if self.link.tx_sending()
            && (!self.pending_reset.requested
                || !self.pending_reset.guard.has_elapsed(now))
        {
            return;
        }

        // Soft-reset the machine, unless we still owe the host a
        // cancel notification and its guard has not fired
        if self.pending_reset.requested
            && (!self.pending_cancel.notify_owed || self.pending_cancel.guard.has_elapsed(now))
        {
            self.perform_reset();
            return;
        }

        // A packet has begun but not finished: bound its reception
        if self.link.rx_started() && !self.link.rx_finished() {
            if !self.packet_in_timeout.is_active() {
                self.packet_in_timeout.start(now, PACKET_RX_TIMEOUT);
            } else if self.packet_in_timeout.has_elapsed(now) {
                self.link.rx_force_timeout();
            }
        }

        if let Some(error) = self.link.rx_error() {
            // Reset packet state quickly and report; the host owns
            // resubmission
            self.packet_in_timeout.abort();
            let mut response = Response::new();
            response.code(match error {
                TransportError::Timeout => ResponseCode::PacketTimeout,
                TransportError::CrcMismatch => ResponseCode::CrcMismatch,
                TransportError::Oversize => ResponseCode::PacketLength,
                TransportError::Noise | TransportError::Overflow => ResponseCode::PacketError,
            });
            self.link.rx_reset();
            self.link.begin_send(&response);
            self.board.indicate_error(ErrorIndicator::HostPacketFault);
        } else if self.link.rx_finished() {
            self.packet_in_timeout.abort();
            let mut response = Response::new();
            if self.pending_cancel.notify_owed {
                response.code(ResponseCode::CancelBuild);
                self.pending_cancel.notify_owed = false;
                self.board.indicate_error(ErrorIndicator::CancelBuild);
            } else if !self.process_action_packet(&mut response)
                && !self.process_query_packet(&mut response)
            {
                response.code(ResponseCode::CmdUnsupported);
            }
            self.link.rx_reset();
            self.link.begin_send(&response);
        }

        // SD playback drained: back to ready
        if self.host_state == HostState::BuildingFromSd && !self.storage.is_playing() {
            self.host_state = HostState::Ready;
        }

        self.print_time.tick(now);
    }

    /// Route an action packet; true when this packet was consumed
    fn process_action_packet(&mut self, response: &mut Response) -> bool {
        let payload = self.link.rx_payload();
        let Some(&opcode) = payload.first() else {
            return false;
        };
        if !is_action_opcode(opcode) {
            return false;
        }

        // While capturing, action packets go to storage instead
        if self.storage.is_capturing() {
            self.storage.capture_bytes(payload);
            response.code(ResponseCode::Ok);
            return true;
        }
        if self.storage.is_playing() {
            response.code(ResponseCode::BotBuilding);
            return true;
        }

        // The executor drains the queue from interrupt context; the
        // capacity check and the copy must be one indivisible step or
        // a torn check-then-write can overflow the queue
        let queue = &mut self.queue;
        let pushed = critical_section::with(|_| {
            if queue.remaining_capacity() >= payload.len() {
                for &byte in payload {
                    queue.push(byte);
                }
                Ok(())
            } else {
                Err(QueueFull)
            }
        });
        response.code(match pushed {
            Ok(()) => ResponseCode::Ok,
            Err(QueueFull) => ResponseCode::BufferOverflow,
        });
        true
    }
}
