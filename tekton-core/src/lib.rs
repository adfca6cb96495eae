//! Board-agnostic host communication and build lifecycle controller
//!
//! This crate contains the subsystem that talks to the print-driving
//! host and owns the build state machines:
//!
//! - Deadline primitive and elapsed-print-time accounting
//! - Host and build state machines
//! - Packet dispatch (queued actions vs. immediate queries)
//! - Build start/stop/pause/cancel transition logic
//! - Master/slave request-response exchange with the tool head
//! - Deferred soft/hard reset sequencing
//!
//! Hardware concerns (UART framing, stepper execution, command queue
//! storage, SD filesystem, EEPROM cells, board indicators) stay behind
//! the traits in [`traits`]; the controller runs to completion inside
//! one cooperative scheduler tick and holds no state across ticks
//! other than its explicit fields.

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom_map;
pub mod host;
pub mod print_time;
pub mod state;
pub mod timeout;
pub mod traits;

pub use host::Host;
pub use state::{BuildState, HostState, PauseState};
pub use timeout::{Duration, Instant, Timeout};
