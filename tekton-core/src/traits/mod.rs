//! Collaborator interfaces consumed by the controller
//!
//! Everything with hardware behind it is abstracted here so the
//! controller can be exercised on the host with mock implementations.
//! The transport mutates packet state from interrupt context; every
//! multi-step read of shared state goes through `critical_section::with`
//! in the controller, not through locks on these traits.

pub mod board;
pub mod eeprom;
pub mod link;
pub mod motion;
pub mod queue;
pub mod storage;
pub mod toolbus;

pub use board::{Board, ErrorIndicator};
pub use eeprom::Eeprom;
pub use link::HostLink;
pub use motion::{MotionController, AXIS_COUNT};
pub use queue::{CommandQueue, QueueFull};
pub use storage::{error_code, DirEntry, Storage, StorageError, MAX_FILE_NAME};
pub use toolbus::ToolBus;
