//! Opcode tables for the host link and the tool bus
//!
//! Query opcodes occupy 0x00..=0x7F and are handled immediately.
//! Action opcodes have bit 7 set and are copied into the command
//! queue unmodified, so only the classification bit matters here.

/// Bit that distinguishes queued action commands from immediate queries
pub const ACTION_BIT: u8 = 0x80;

/// Classify an opcode: true for queued action commands
pub fn is_action_opcode(opcode: u8) -> bool {
    opcode & ACTION_BIT != 0
}

// Host query opcodes
pub const HOST_CMD_VERSION: u8 = 0;
pub const HOST_CMD_INIT: u8 = 1;
pub const HOST_CMD_GET_BUFFER_SIZE: u8 = 2;
pub const HOST_CMD_CLEAR_BUFFER: u8 = 3;
pub const HOST_CMD_GET_POSITION: u8 = 4;
pub const HOST_CMD_ABORT: u8 = 7;
pub const HOST_CMD_PAUSE: u8 = 8;
pub const HOST_CMD_TOOL_QUERY: u8 = 10;
pub const HOST_CMD_IS_FINISHED: u8 = 11;
pub const HOST_CMD_READ_EEPROM: u8 = 12;
pub const HOST_CMD_WRITE_EEPROM: u8 = 13;
pub const HOST_CMD_CAPTURE_TO_FILE: u8 = 14;
pub const HOST_CMD_END_CAPTURE: u8 = 15;
pub const HOST_CMD_PLAYBACK_CAPTURE: u8 = 16;
pub const HOST_CMD_RESET: u8 = 17;
pub const HOST_CMD_NEXT_FILENAME: u8 = 18;
pub const HOST_CMD_GET_BUILD_NAME: u8 = 20;
pub const HOST_CMD_GET_POSITION_EXT: u8 = 21;
pub const HOST_CMD_EXTENDED_STOP: u8 = 22;
pub const HOST_CMD_BOARD_STATUS: u8 = 23;
pub const HOST_CMD_GET_BUILD_STATS: u8 = 24;
pub const HOST_CMD_ADVANCED_VERSION: u8 = 27;

// Tool bus (slave) opcodes issued by this board as bus master
pub const SLAVE_CMD_PAUSE_UNPAUSE: u8 = 23;

/// Firmware revision reported to up-to-date clients
pub const FIRMWARE_VERSION: u16 = 301;

/// Internal build revision reported by ADVANCED_VERSION
pub const INTERNAL_VERSION: u16 = 0;

/// Identifies this firmware variant to the host
pub const SOFTWARE_VARIANT_ID: u8 = 0x01;

/// Oldest client protocol revision the firmware cooperates with
pub const MIN_CLIENT_REVISION: i16 = 39;

/// Legacy client revision allowed through the version gate anyway;
/// it is the only old client able to configure a second tool head.
pub const GRANDFATHERED_CLIENT_REVISION: i16 = 29;
