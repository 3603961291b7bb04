//! Side-channel envelope (JSON).
//!
//! The wire format is a JSON object with exactly two string-valued keys,
//! `"type"` and `"data"`:
//!
//! ```text
//! {"type":"broadcast_time","data":" 01 : 05 "}
//! ```
//!
//! The two key names and the kind literals are the complete fixed wire
//! vocabulary. Decoding is tolerant by contract: the side channel may carry
//! payloads this endpoint does not understand, so a well-formed string map
//! that is not a recognized signal comes back as [`Decoded::Foreign`]
//! rather than an error.

use bytes::Bytes;
use serde::Serialize;

use crate::error::{Result, SidecastError};

/// JSON key carrying the envelope kind.
pub const KEY_TYPE: &str = "type";
/// JSON key carrying the envelope payload.
pub const KEY_DATA: &str = "data";

/// Envelope kinds a session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Periodic broadcast-duration tick; payload is the `" MM : SS "` string.
    BroadcastTime,
    /// One-shot survey trigger; payload is an opaque survey code.
    Questionnaire,
}

impl SignalKind {
    /// Stable wire literal.
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::BroadcastTime => "broadcast_time",
            SignalKind::Questionnaire => "questionnaire",
        }
    }

    /// Parse a wire literal. Unknown literals yield `None` (foreign signal,
    /// not an error).
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "broadcast_time" => Some(SignalKind::BroadcastTime),
            "questionnaire" => Some(SignalKind::Questionnaire),
            _ => None,
        }
    }
}

/// One signaling message: exactly one kind and one payload string.
///
/// No batching: a transport write carries exactly one envelope, constructed
/// immediately before the write and discarded after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kind: SignalKind,
    pub data: String,
}

/// Serialization shape for the two-key wire object. Field order fixes the
/// textual output to `{"type":...,"data":...}`.
#[derive(Serialize)]
struct WireEnvelope<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: &'a str,
}

/// Decode outcome for payloads that parsed cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A recognized signal.
    Signal(Envelope),
    /// Well-formed string map this endpoint does not understand. Ignored.
    Foreign,
}

impl Envelope {
    pub fn new(kind: SignalKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Encode as the two-key JSON object.
    pub fn encode(&self) -> Result<Bytes> {
        let wire = WireEnvelope {
            kind: self.kind.as_str(),
            data: &self.data,
        };
        let buf =
            serde_json::to_vec(&wire).map_err(|e| SidecastError::Encode(e.to_string()))?;
        Ok(Bytes::from(buf))
    }

    /// Decode side-channel bytes.
    ///
    /// - invalid JSON => `Err(Decode)`
    /// - valid JSON that is not a string-to-string object => `Err(UnrecognizedShape)`
    /// - string map without a recognized `type`/`data` pair => `Ok(Foreign)`
    /// - recognized signal => `Ok(Signal)`
    ///
    /// The last two are deliberate: missing keys and unknown kind literals
    /// mean "no actionable message here", never a failure.
    pub fn decode(bytes: &[u8]) -> Result<Decoded> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| SidecastError::Decode(e.to_string()))?;

        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(SidecastError::UnrecognizedShape(format!(
                    "expected object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        // Receivers treat the payload as a string-to-string mapping: any
        // non-string value disqualifies the whole payload, extra string
        // keys do not.
        let mut kind_str: Option<&str> = None;
        let mut data_str: Option<&str> = None;
        for (k, v) in &map {
            let Some(s) = v.as_str() else {
                return Err(SidecastError::UnrecognizedShape(format!(
                    "non-string value under key {k:?}"
                )));
            };
            if k == KEY_TYPE {
                kind_str = Some(s);
            } else if k == KEY_DATA {
                data_str = Some(s);
            }
        }

        let (Some(kind_str), Some(data)) = (kind_str, data_str) else {
            return Ok(Decoded::Foreign);
        };
        match SignalKind::from_wire(kind_str) {
            Some(kind) => Ok(Decoded::Signal(Envelope::new(kind, data))),
            None => Ok(Decoded::Foreign),
        }
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
