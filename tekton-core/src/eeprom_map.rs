//! Persisted-settings layout
//!
//! Byte offsets into the board's EEPROM for the settings this core
//! reads, with the defaults used when a cell is still erased. The
//! storage driver itself is external; see [`crate::traits::Eeprom`].

/// Start of the user-visible machine name block
pub const MACHINE_NAME: u16 = 0x0020;

/// Maximum stored machine name length, NUL padding not guaranteed
pub const MACHINE_NAME_LEN: usize = 16;

/// Non-zero: a reset request during a build cancels the build instead
/// of resetting the board outright
pub const CLEAR_FOR_ESTOP: u16 = 0x0014;

/// Number of copies an SD build prints before finishing
pub const COPIES_TO_PRINT: u16 = 0x0015;

pub const DEFAULT_MACHINE_NAME_BYTE: u8 = 0;
pub const DEFAULT_CLEAR_FOR_ESTOP: u8 = 0;
pub const DEFAULT_COPIES_TO_PRINT: u8 = 1;

/// Name reported when the EEPROM block is empty
pub const FALLBACK_MACHINE_NAME: &[u8] = b"Tekton";
