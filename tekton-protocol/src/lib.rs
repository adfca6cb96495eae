//! Host Communication Protocol
//!
//! This crate defines the serial protocol vocabulary between the
//! print-driving host software and the controller board. The framing
//! layer (start byte, CRC, byte escaping) lives in the transport; what
//! arrives here is an already-deframed packet payload:
//!
//! ```text
//! ┌────────┬──────────────────┐
//! │ OPCODE │ PAYLOAD          │
//! │ 1B     │ command-specific │
//! └────────┴──────────────────┘
//! ```
//!
//! Opcode bit 7 set means a queued action command; clear means an
//! immediate query answered in the same tick. Every reply starts with
//! a [`ResponseCode`] byte followed by a command-specific payload.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod response;
pub mod wire;

pub use commands::is_action_opcode;
pub use response::{Response, ResponseCode, MAX_RESPONSE_PAYLOAD};
pub use wire::TransportError;
