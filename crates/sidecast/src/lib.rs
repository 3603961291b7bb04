//! Top-level facade crate for sidecast.
//!
//! Re-exports the protocol core and the session runtime so users can depend
//! on a single crate.

pub mod core {
    pub use sidecast_core::*;
}

pub mod session {
    pub use sidecast_session::*;
}
