//! Broadcast-duration bookkeeping.
//!
//! The counter and its display format sit next to the wire types because
//! the formatted string is exactly what travels in a `broadcast_time`
//! envelope, padded and spaced the way every receiver renders it.

/// Format a second count as `" MM : SS "` with zero-padded two-digit fields
/// (65 => `" 01 : 05 "`).
///
/// Minutes widen past two digits instead of wrapping; 6000 seconds renders
/// as `" 100 : 00 "`.
pub fn format_elapsed(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!(" {minutes:02} : {seconds:02} ")
}

/// Elapsed-seconds counter for one streaming session.
///
/// Starts at zero, advances once per wall-clock second while the outbound
/// stream is live, and is discarded when the session ends. A new session
/// always restarts from zero; nothing persists.
#[derive(Debug, Default)]
pub struct BroadcastClock {
    elapsed: u64,
}

impl BroadcastClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one second and return the display string for the new value.
    pub fn tick(&mut self) -> String {
        self.elapsed += 1;
        format_elapsed(self.elapsed)
    }

    /// Seconds elapsed since the session went live.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    /// Discard the counter (session ended).
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}
