//! Transport seam.
//!
//! The comm channel itself — its lifecycle, reconnects, retries — is owned
//! by the host. The client only needs two capabilities: obtain a channel
//! ([`TransportProvider`]) and deliver one envelope for one response
//! ([`Transport`]). A transport is called at most once per request; if it
//! never resolves, the caller hangs, by contract.

mod channel;

pub use channel::ChannelTransport;

use async_trait::async_trait;
use sheetlink_contract::TransportError;
use sheetlink_protocol::{RequestEnvelope, ResponseBody};
use std::sync::Arc;

/// An established comm channel.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one envelope and await its correlated response.
    ///
    /// No retries happen at this layer. Implementations resolve with the
    /// decoded response, fail with a transport error, or hang forever —
    /// all three are handled (or deliberately not) by the caller.
    async fn send(&self, envelope: &RequestEnvelope) -> Result<ResponseBody, TransportError>;
}

/// Supplies the comm channel, possibly asynchronously.
///
/// The client memoizes the first successful acquisition; a `None` result
/// is not cached, so every later call retries acquisition.
#[async_trait]
pub trait TransportProvider: Send + Sync {
    /// Attempt to obtain the transport. `None` means no channel could be
    /// established right now.
    async fn acquire(&self) -> Option<Arc<dyn Transport>>;
}
