//! Shared error type across sidecast crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SidecastError>;

/// Unified error type used by the protocol core and the session runtime.
///
/// Nothing here is fatal to a session: receive-side variants are logged and
/// dropped, send-side variants degrade to a `false` send result, and
/// `NotConfigured` refuses a session start before any transport work begins.
#[derive(Debug, Error)]
pub enum SidecastError {
    /// Outgoing envelope could not be serialized.
    #[error("envelope encode failed: {0}")]
    Encode(String),
    /// Inbound bytes were not a valid serialized mapping.
    #[error("envelope decode failed: {0}")]
    Decode(String),
    /// Inbound bytes parsed but were not a string-to-string mapping.
    #[error("envelope shape not recognized: {0}")]
    UnrecognizedShape(String),
    /// The transport's broadcast-send primitive reported a nonzero code.
    #[error("transport rejected send with code {0}")]
    SendRejected(i32),
    /// Credentials or channel are missing; session start refused.
    #[error("session not configured: {0}")]
    NotConfigured(String),
    /// Transport-level failure (join, side-channel open).
    #[error("transport failure: {0}")]
    Transport(String),
    /// Session lifecycle misuse, e.g. starting a session that is already live.
    #[error("invalid session state: {0}")]
    State(String),
}

impl SidecastError {
    /// Stable string code (log fields, counter labels, test assertions).
    pub fn code(&self) -> &'static str {
        match self {
            SidecastError::Encode(_) => "ENCODE_FAILED",
            SidecastError::Decode(_) => "DECODE_FAILED",
            SidecastError::UnrecognizedShape(_) => "UNRECOGNIZED_SHAPE",
            SidecastError::SendRejected(_) => "SEND_REJECTED",
            SidecastError::NotConfigured(_) => "NOT_CONFIGURED",
            SidecastError::Transport(_) => "TRANSPORT",
            SidecastError::State(_) => "BAD_STATE",
        }
    }

    /// Receive-side noise is dropped after a debug log, never surfaced.
    /// The side channel may legitimately carry payloads this endpoint does
    /// not understand.
    pub fn is_receive_noise(&self) -> bool {
        matches!(
            self,
            SidecastError::Decode(_) | SidecastError::UnrecognizedShape(_)
        )
    }
}
