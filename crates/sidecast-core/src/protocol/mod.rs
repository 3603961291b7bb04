//! Wire protocol for the broadcast side channel.
//!
//! This module hosts the signaling wire format and its companion state:
//! - `envelope`: the two-key JSON signal envelope and its tolerance rules.
//! - `clock`: the broadcast-duration counter and display formatting.
//!
//! All parsing is panic-free: malformed input is reported as
//! `SidecastError` instead of panicking, keeping endpoints resilient to
//! foreign or hostile side-channel traffic.

pub mod clock;
pub mod envelope;
