//! sidecast core: transport-agnostic signaling primitives and error types.
//!
//! This crate defines the side-channel wire contract shared by the session
//! runtime and by tooling. It intentionally carries no transport or runtime
//! dependencies so it can be embedded anywhere an endpoint needs to speak
//! the envelope format.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SidecastError`/`Result` so malformed
//! side-channel traffic cannot take an endpoint down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, SidecastError};
