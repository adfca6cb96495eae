//! Host serial link interface
//!
//! The transport owns framing, CRC and byte escaping, and is driven
//! from the UART interrupt; reception progresses asynchronously with
//! respect to the controller tick. The controller only inspects the
//! deframed inbound packet and hands back complete responses.

use tekton_protocol::{Response, TransportError};

pub trait HostLink {
    /// A packet has begun arriving
    fn rx_started(&self) -> bool;

    /// The inbound packet is complete and ready to process
    fn rx_finished(&self) -> bool;

    /// Transport fault recorded for the inbound packet, if any
    fn rx_error(&self) -> Option<TransportError>;

    /// Deframed payload of the inbound packet: opcode byte first
    fn rx_payload(&self) -> &[u8];

    /// Discard the inbound packet so the next one can be received
    fn rx_reset(&mut self);

    /// Force the in-progress packet into the timeout error state;
    /// called when the receive deadline fires mid-packet
    fn rx_force_timeout(&mut self);

    /// An outbound response is still being transmitted
    fn tx_sending(&self) -> bool;

    /// Begin transmitting a response; transmission continues from
    /// interrupt context after this returns
    fn begin_send(&mut self, response: &Response);
}
