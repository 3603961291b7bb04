//! Signal dispatch.
//!
//! The outbound half encodes and hands envelopes to the transport; the
//! inbound half decodes raw side-channel bytes and routes recognized
//! signals to the display and survey sinks.

pub mod router;
pub mod sender;

pub use router::SignalRouter;
pub use sender::SignalSender;
