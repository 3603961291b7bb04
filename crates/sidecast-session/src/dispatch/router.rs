use std::sync::atomic::Ordering;
use std::sync::Arc;

use sidecast_core::protocol::envelope::{Decoded, Envelope, SignalKind};

use crate::obs::SignalCounters;
use crate::policy::{PolicyDecision, SenderPolicy};
use crate::sinks::{DisplaySink, SurveySink};
use crate::transport::ParticipantId;

/// Inbound half of the side channel.
///
/// Dispatch never fails: the channel is shared with arbitrary foreign
/// traffic, so anything that is not a recognized signal is counted, logged
/// at debug, and dropped.
pub struct SignalRouter {
    display: Arc<dyn DisplaySink>,
    survey: Arc<dyn SurveySink>,
    policy: Arc<SenderPolicy>,
    counters: Arc<SignalCounters>,
}

impl SignalRouter {
    pub fn new(
        display: Arc<dyn DisplaySink>,
        survey: Arc<dyn SurveySink>,
        policy: Arc<SenderPolicy>,
        counters: Arc<SignalCounters>,
    ) -> Self {
        Self {
            display,
            survey,
            policy,
            counters,
        }
    }

    /// Route one raw side-channel payload from `sender`.
    pub fn dispatch(&self, sender: ParticipantId, bytes: &[u8]) {
        match self.policy.check_sender(sender) {
            PolicyDecision::Pass => {}
            PolicyDecision::Drop => {
                self.counters.policy_dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(sender, "signal dropped by sender policy");
                return;
            }
        }

        match Envelope::decode(bytes) {
            Ok(Decoded::Signal(env)) => {
                self.deliver(sender, env.kind, &env.data);
            }
            Ok(Decoded::Foreign) => {
                self.counters.foreign.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(sender, "foreign side-channel payload ignored");
            }
            Err(e) => {
                self.counters.decode_noise.fetch_add(1, Ordering::Relaxed);
                if e.is_receive_noise() {
                    tracing::debug!(sender, code = e.code(), "side-channel payload dropped: {e}");
                } else {
                    tracing::warn!(sender, code = e.code(), "side-channel decode failure: {e}");
                }
            }
        }
    }

    fn deliver(&self, sender: ParticipantId, kind: SignalKind, data: &str) {
        match kind {
            SignalKind::BroadcastTime => {
                // The readout stays hidden until the first tick lands.
                self.display.set_timer_visible(true);
                self.display.show_elapsed(data);
            }
            SignalKind::Questionnaire => {
                tracing::info!(sender, code = data, "survey trigger received");
                self.survey.open_survey(data);
            }
        }
        self.counters.delivered.fetch_add(1, Ordering::Relaxed);
    }
}
