//! Query opcode handler table
//!
//! Each handler reads fixed-offset fields out of the inbound payload
//! and appends a response code plus a typed payload. Handlers run to
//! completion inside the current tick.

use heapless::Vec;

use tekton_protocol::commands::{
    FIRMWARE_VERSION, GRANDFATHERED_CLIENT_REVISION, HOST_CMD_ABORT, HOST_CMD_ADVANCED_VERSION,
    HOST_CMD_BOARD_STATUS, HOST_CMD_CAPTURE_TO_FILE, HOST_CMD_CLEAR_BUFFER, HOST_CMD_END_CAPTURE,
    HOST_CMD_EXTENDED_STOP, HOST_CMD_GET_BUFFER_SIZE, HOST_CMD_GET_BUILD_NAME,
    HOST_CMD_GET_BUILD_STATS, HOST_CMD_GET_POSITION, HOST_CMD_GET_POSITION_EXT, HOST_CMD_INIT,
    HOST_CMD_IS_FINISHED, HOST_CMD_NEXT_FILENAME, HOST_CMD_PAUSE, HOST_CMD_PLAYBACK_CAPTURE,
    HOST_CMD_READ_EEPROM, HOST_CMD_RESET, HOST_CMD_TOOL_QUERY, HOST_CMD_VERSION,
    HOST_CMD_WRITE_EEPROM, INTERNAL_VERSION, MIN_CLIENT_REVISION, SOFTWARE_VARIANT_ID,
};
use tekton_protocol::{is_action_opcode, wire, Response, ResponseCode};

use super::tool::MAX_TOOL_REQUEST;
use super::Host;
use crate::eeprom_map;
use crate::state::{BuildState, HeaterPolicy, HostState};
use crate::traits::{
    error_code, Board, CommandQueue, Eeprom, ErrorIndicator, HostLink, MotionController, Storage,
    StorageError, ToolBus, MAX_FILE_NAME,
};

// Extended-stop flag bits
const ES_STEPPERS: u8 = 1 << 0;
const ES_COMMANDS: u8 = 1 << 1;

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
    /// Route a query packet; true when the opcode was recognized
    pub(super) fn process_query_packet(&mut self, response: &mut Response) -> bool {
        let Some(&opcode) = self.link.rx_payload().first() else {
            return false;
        };
        if is_action_opcode(opcode) {
            return false;
        }

        match opcode {
            HOST_CMD_VERSION => self.handle_version(response),
            HOST_CMD_ADVANCED_VERSION => self.handle_advanced_version(response),
            HOST_CMD_GET_BUILD_NAME => self.handle_get_build_name(response),
            // Nothing to do; never interrupts a running build
            HOST_CMD_INIT => response.code(ResponseCode::Ok),
            // Equivalent at current time
            HOST_CMD_CLEAR_BUFFER | HOST_CMD_ABORT | HOST_CMD_RESET => {
                self.handle_soft_reset(response)
            }
            HOST_CMD_GET_BUFFER_SIZE => self.handle_get_buffer_size(response),
            HOST_CMD_GET_POSITION => self.handle_get_position(response),
            HOST_CMD_GET_POSITION_EXT => self.handle_get_position_ext(response),
            HOST_CMD_CAPTURE_TO_FILE => self.handle_capture_to_file(response),
            HOST_CMD_END_CAPTURE => self.handle_end_capture(response),
            HOST_CMD_PLAYBACK_CAPTURE => self.handle_playback(response),
            HOST_CMD_NEXT_FILENAME => self.handle_next_filename(response),
            HOST_CMD_PAUSE => self.handle_pause(response),
            HOST_CMD_TOOL_QUERY => self.handle_tool_query(response),
            HOST_CMD_IS_FINISHED => self.handle_is_finished(response),
            HOST_CMD_READ_EEPROM => self.handle_read_eeprom(response),
            HOST_CMD_WRITE_EEPROM => self.handle_write_eeprom(response),
            HOST_CMD_EXTENDED_STOP => self.handle_extended_stop(response),
            HOST_CMD_BOARD_STATUS => self.handle_board_status(response),
            HOST_CMD_GET_BUILD_STATS => self.handle_get_build_stats(response),
            _ => return false,
        }
        true
    }

    /// Version negotiation
    ///
    /// Clients older than the minimum revision mis-drive the protocol;
    /// for them the reply is deliberately version 0 so they show an
    /// upgrade prompt instead. One legacy revision is allowed through:
    /// it is still needed to configure a second tool head.
    fn handle_version(&mut self, response: &mut Response) {
        let revision = wire::read_i16(self.link.rx_payload(), 1).unwrap_or(0);
        response.code(ResponseCode::Ok);
        if revision != GRANDFATHERED_CLIENT_REVISION && revision < MIN_CLIENT_REVISION {
            response.append_u16(0);
        } else {
            response.append_u16(FIRMWARE_VERSION);
        }
    }

    fn handle_advanced_version(&mut self, response: &mut Response) {
        // The client revision at offset 1 is not used here
        response.code(ResponseCode::Ok);
        response.append_u16(FIRMWARE_VERSION);
        response.append_u16(INTERNAL_VERSION);
        response.append_u8(SOFTWARE_VARIANT_ID);
        response.append_u8(0);
        response.append_u16(0);
    }

    fn handle_get_build_name(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);
        response.append_bytes(&self.build_name);
        response.append_u8(0);
    }

    /// CLEAR_BUFFER / ABORT / RESET: schedule a deferred reset, or
    /// cancel the build instead when the estop setting says so
    fn handle_soft_reset(&mut self, response: &mut Response) {
        let mut reset_board = true;
        if matches!(
            self.host_state,
            HostState::Building | HostState::BuildingFromSd
        ) {
            let clear_for_estop = self
                .eeprom
                .read_u8(eeprom_map::CLEAR_FOR_ESTOP, eeprom_map::DEFAULT_CLEAR_FOR_ESTOP);
            if clear_for_estop == 1 {
                self.build_state = BuildState::Canceled;
                reset_board = false;
                self.stop_build();
            }
            self.board.indicate_error(ErrorIndicator::ResetDuringBuild);
        }
        if reset_board {
            // Executes once this response has been sent
            self.request_reset(false);
        }
        response.code(ResponseCode::Ok);
    }

    fn handle_get_buffer_size(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);
        response.append_u32(self.queue.remaining_capacity() as u32);
    }

    /// Position snapshot, 3-axis wire variant
    fn handle_get_position(&mut self, response: &mut Response) {
        // Steppers advance from interrupt context; the multi-axis
        // snapshot must be consistent
        let motion = &self.motion;
        let (position, endstops) =
            critical_section::with(|_| (motion.position(), motion.endstop_status()));
        response.code(ResponseCode::Ok);
        for axis in &position[..3] {
            response.append_i32(*axis);
        }
        // Endstop bits (7-0): n/a, n/a, z max, z min, y max, y min,
        // x max, x min
        response.append_u8(endstops);
    }

    /// Position snapshot, 5-axis wire variant with wide endstop mask
    fn handle_get_position_ext(&mut self, response: &mut Response) {
        let motion = &self.motion;
        let (position, endstops) =
            critical_section::with(|_| (motion.position(), motion.endstop_status()));
        response.code(ResponseCode::Ok);
        for axis in &position {
            response.append_i32(*axis);
        }
        response.append_u16(endstops as u16);
    }

    fn handle_capture_to_file(&mut self, response: &mut Response) {
        let mut name: Vec<u8, MAX_FILE_NAME> = Vec::new();
        for &byte in &self.link.rx_payload()[1..] {
            if byte == 0 || name.push(byte).is_err() {
                break;
            }
        }
        let result = self.storage.start_capture(&name);
        response.code(ResponseCode::Ok);
        response.append_u8(error_code(result));
    }

    fn handle_end_capture(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);
        response.append_u32(self.storage.finish_capture());
        self.storage.reset();
    }

    fn handle_playback(&mut self, response: &mut Response) {
        let mut name: Vec<u8, MAX_FILE_NAME> = Vec::new();
        for &byte in &self.link.rx_payload()[1..] {
            if byte == 0 || name.push(byte).is_err() {
                break;
            }
        }
        response.code(ResponseCode::Ok);
        let result = self.start_build_from_sd(Some(&name));
        response.append_u8(error_code(result));
    }

    /// Advance directory traversal, skipping hidden dot entries; the
    /// parent directory entry is the one dot name listed
    fn handle_next_filename(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);

        let restart = wire::read_u8(self.link.rx_payload(), 1).unwrap_or(0) != 0;
        if restart {
            match self.storage.directory_reset() {
                // A locked card can still be listed
                Ok(()) | Err(StorageError::CardLocked) => {}
                Err(e) => {
                    response.append_u8(e as u8);
                    response.append_u8(0);
                    return;
                }
            }
        }

        let entry = loop {
            match self.storage.next_directory_entry() {
                None => break None,
                Some(entry) => {
                    let name = &entry.name;
                    if name.first() != Some(&b'.')
                        || (entry.is_dir && name.len() == 2 && name[1] == b'.')
                    {
                        break Some(entry);
                    }
                }
            }
        };

        // Traversal itself cannot fail past this point
        response.append_u8(0);
        if let Some(entry) = entry {
            response.append_bytes(&entry.name);
        }
        // Empty name signals end of listing
        response.append_u8(0);
    }

    /// Toggle build pause and forward the pause to the tool head
    ///
    /// Ignored entirely while an earlier pause/resume is still
    /// mid-transition.
    fn handle_pause(&mut self, response: &mut Response) {
        if !self.queue.pause_state().is_intermediate() {
            let pause = !self.queue.is_paused();
            self.pause_build(pause, HeaterPolicy::ALL_OFF);
            self.tool_pause(response);
        }
        response.code(ResponseCode::Ok);
    }

    /// Forward a host query to the tool head and relay the response
    fn handle_tool_query(&mut self, response: &mut Response) {
        let payload = self.link.rx_payload();
        // Payload must contain the tool address and at least one byte
        if payload.len() < 2 {
            response.code(ResponseCode::PacketError);
            self.board.indicate_error(ErrorIndicator::HostTruncatedCmd);
            return;
        }
        let mut request: Vec<u8, MAX_TOOL_REQUEST> = Vec::new();
        let _ = request.extend_from_slice(&payload[1..payload.len().min(1 + MAX_TOOL_REQUEST)]);

        if !self.acquire_tool_lock(response) {
            return;
        }
        self.run_tool_transaction(&request, response);
    }

    fn handle_is_finished(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);
        let motion = &self.motion;
        let queue = &self.queue;
        let done = critical_section::with(|_| !motion.is_running() && queue.is_empty());
        response.append_u8(done as u8);
    }

    fn handle_read_eeprom(&mut self, response: &mut Response) {
        let payload = self.link.rx_payload();
        let (Some(offset), Some(length)) = (wire::read_u16(payload, 1), wire::read_u8(payload, 3))
        else {
            response.code(ResponseCode::PacketError);
            self.board.indicate_error(ErrorIndicator::HostTruncatedCmd);
            return;
        };
        let mut data = [0u8; 256];
        let data = &mut data[..length as usize];
        self.eeprom.read_block(offset, data);
        response.code(ResponseCode::Ok);
        response.append_bytes(data);
    }

    fn handle_write_eeprom(&mut self, response: &mut Response) {
        let payload = self.link.rx_payload();
        let (Some(offset), Some(length)) = (wire::read_u16(payload, 1), wire::read_u8(payload, 3))
        else {
            response.code(ResponseCode::PacketError);
            self.board.indicate_error(ErrorIndicator::HostTruncatedCmd);
            return;
        };
        let Some(data) = payload.get(4..4 + length as usize) else {
            response.code(ResponseCode::PacketError);
            self.board.indicate_error(ErrorIndicator::HostTruncatedCmd);
            return;
        };
        // The motion/timer interrupt path reads settings; it must not
        // observe a partial write
        let eeprom = &mut self.eeprom;
        critical_section::with(|_| eeprom.write_block(offset, data));
        response.code(ResponseCode::Ok);
        response.append_u8(length);
    }

    /// Stop motion and/or purge the queue, independently selectable
    fn handle_extended_stop(&mut self, response: &mut Response) {
        let flags = wire::read_u8(self.link.rx_payload(), 1).unwrap_or(0);
        if flags & ES_STEPPERS != 0 {
            self.motion.abort();
        }
        if flags & ES_COMMANDS != 0 {
            self.queue.reset();
        }
        response.code(ResponseCode::Ok);
        response.append_u8(0);
    }

    fn handle_board_status(&mut self, response: &mut Response) {
        response.code(ResponseCode::Ok);
        // No status conditions reported yet
        response.append_u8(0);
    }

    /// Current print stats while printing, last print stats otherwise
    fn handle_get_build_stats(&mut self, response: &mut Response) {
        let now = self.board.now();
        let (hours, minutes) = self.print_time.elapsed(now);

        response.code(ResponseCode::Ok);
        response.append_u8(self.build_state as u8);
        response.append_u8(hours);
        response.append_u8(minutes);
        if self.build_state.is_active() {
            response.append_u32(self.queue.line_number());
        } else {
            response.append_u32(self.last_print_line);
        }
        // Open spot for filament detect info
        response.append_u32(0);
    }
}
