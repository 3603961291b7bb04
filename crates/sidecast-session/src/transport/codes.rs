//! Human-readable descriptions for engine diagnostic codes.
//!
//! The numeric values follow the RTC engine family this runtime fronts;
//! anything outside the known set falls back to a generic label so log
//! lines stay printable.

/// Send rejection: the sending uid is not on the channel.
pub const SEND_ERR_NOT_JOINED: i32 = -1;
/// Send rejection: the sender never opened the side channel it targets.
pub const SEND_ERR_NO_SIDE_CHANNEL: i32 = -2;
/// Send rejection: payload exceeds the per-message byte cap.
pub const SEND_ERR_PAYLOAD_TOO_LARGE: i32 = -3;

pub fn send_code_description(code: i32) -> &'static str {
    match code {
        0 => "accepted",
        SEND_ERR_NOT_JOINED => "sender not joined",
        SEND_ERR_NO_SIDE_CHANNEL => "side channel not open",
        SEND_ERR_PAYLOAD_TOO_LARGE => "payload too large",
        _ => "unknown send code",
    }
}

pub fn warning_description(code: i32) -> &'static str {
    match code {
        8 => "invalid view",
        16 => "init video failed",
        20 => "pending",
        103 => "no available channel",
        104 => "lookup channel timeout",
        105 => "lookup channel rejected",
        106 => "open channel timeout",
        107 => "open channel rejected",
        _ => "unknown warning",
    }
}

pub fn error_description(code: i32) -> &'static str {
    match code {
        17 => "join channel rejected",
        18 => "leave channel rejected",
        101 => "invalid app id",
        102 => "invalid channel name",
        109 => "token expired",
        110 => "invalid token",
        _ => "unknown error",
    }
}
