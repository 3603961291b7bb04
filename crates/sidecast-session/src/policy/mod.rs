//! Sender policy for inbound side-channel signals.
//!
//! Compiles the policy section of the config into a fast lookup structure
//! the router consults once per inbound payload. The wire format carries no
//! sender identity of its own, so the only usable discriminator is the
//! transport-level sender uid.

use crate::config::schema::{PolicySection, SenderRule};
use crate::transport::ParticipantId;

/// Decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Pass,
    Drop,
}

/// Compiled sender policy.
/// Construct once at session start, then share via Arc.
pub struct SenderPolicy {
    rule: SenderRule,
    allowed: Vec<ParticipantId>,
}

impl SenderPolicy {
    pub fn compile(section: &PolicySection) -> Self {
        let mut allowed = section.allowed_uids.clone();
        allowed.sort_unstable();
        allowed.dedup();
        Self {
            rule: section.signal_senders,
            allowed,
        }
    }

    pub fn check_sender(&self, uid: ParticipantId) -> PolicyDecision {
        match self.rule {
            SenderRule::Any => PolicyDecision::Pass,
            SenderRule::Allowlist => {
                if self.allowed.binary_search(&uid).is_ok() {
                    PolicyDecision::Pass
                } else {
                    PolicyDecision::Drop
                }
            }
        }
    }
}
