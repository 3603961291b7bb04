use std::sync::atomic::{AtomicU64, Ordering};

/// Side-channel traffic counters for one session.
///
/// Shared via Arc between the sender, the router, and the session facade.
/// All increments are relaxed; these are tallies, not synchronization.
#[derive(Default)]
pub struct SignalCounters {
    /// Envelopes the transport accepted for delivery.
    pub sent: AtomicU64,
    /// Envelopes refused at encode time or by the transport.
    pub send_rejected: AtomicU64,
    /// Inbound signals recognized and handed to a sink.
    pub delivered: AtomicU64,
    /// Well-formed inbound payloads this endpoint does not understand.
    pub foreign: AtomicU64,
    /// Inbound payloads dropped as undecodable.
    pub decode_noise: AtomicU64,
    /// Inbound payloads dropped by sender policy.
    pub policy_dropped: AtomicU64,
}

/// Point-in-time copy of [`SignalCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountersSnapshot {
    pub sent: u64,
    pub send_rejected: u64,
    pub delivered: u64,
    pub foreign: u64,
    pub decode_noise: u64,
    pub policy_dropped: u64,
}

impl SignalCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            send_rejected: self.send_rejected.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            foreign: self.foreign.load(Ordering::Relaxed),
            decode_noise: self.decode_noise.load(Ordering::Relaxed),
            policy_dropped: self.policy_dropped.load(Ordering::Relaxed),
        }
    }
}
