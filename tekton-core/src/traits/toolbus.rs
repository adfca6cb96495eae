//! Tool bus interface
//!
//! The secondary command channel to tool-head peripherals. This board
//! is the bus master; exchanges are request/response transactions
//! arbitrated by a mutual-exclusion lock shared with other bus users.
//! The bus scheduler enforces its own response deadline, so a caller
//! polling [`ToolBus::transaction_done`] while calling
//! [`ToolBus::run_bus_tick`] is bounded.

use tekton_protocol::TransportError;

pub trait ToolBus {
    /// Try to take the bus lock; non-blocking
    fn try_lock(&mut self) -> bool;

    fn release_lock(&mut self);

    /// Index of the tool head currently addressed by board-initiated
    /// commands
    fn current_toolhead(&self) -> u8;

    /// Begin a request/response exchange; `request` starts with the
    /// tool address byte
    fn start_transaction(&mut self, request: &[u8]);

    /// The exchange has completed (response received or timed out)
    fn transaction_done(&self) -> bool;

    /// Advance the bus scheduler one step
    fn run_bus_tick(&mut self);

    /// Fault recorded for the last exchange, if any
    fn response_error(&self) -> Option<TransportError>;

    /// Response payload of the last exchange, its own status byte first
    fn response_payload(&self) -> &[u8];
}
