//! sidecast session library entry.
//!
//! This crate wires the envelope codec from `sidecast-core` into a live
//! session runtime: broadcaster and audience lifecycles, the timer and
//! survey emitters, inbound signal routing, and an in-memory loopback
//! transport for rehearsing a full session without real media plumbing.
//! It is intended to be consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod config;
pub mod dispatch;
pub mod emitter;
pub mod obs;
pub mod policy;
pub mod session;
pub mod sinks;
pub mod transport;
