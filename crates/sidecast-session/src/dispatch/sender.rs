use std::sync::atomic::Ordering;
use std::sync::Arc;

use sidecast_core::protocol::envelope::{Envelope, SignalKind};

use crate::obs::SignalCounters;
use crate::transport::{codes, ParticipantId, SideChannelTransport};

/// Outbound half of the side channel: one envelope per call, encoded
/// immediately before the transport write.
pub struct SignalSender {
    transport: Arc<dyn SideChannelTransport>,
    uid: ParticipantId,
    stream_id: u32,
    counters: Arc<SignalCounters>,
}

impl SignalSender {
    pub fn new(
        transport: Arc<dyn SideChannelTransport>,
        uid: ParticipantId,
        stream_id: u32,
        counters: Arc<SignalCounters>,
    ) -> Self {
        Self {
            transport,
            uid,
            stream_id,
            counters,
        }
    }

    /// Send one signal. Returns whether the transport accepted it.
    ///
    /// A `false` is terminal for this payload: no retry, no buffering. The
    /// timer emitter simply carries on with the next tick and a survey
    /// trigger reports the failure to the operator.
    pub async fn send(&self, kind: SignalKind, data: &str) -> bool {
        let env = Envelope::new(kind, data);
        let bytes = match env.encode() {
            Ok(b) => b,
            Err(e) => {
                self.counters.send_rejected.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(code = e.code(), "signal encode failed: {e}");
                return false;
            }
        };

        let code = self
            .transport
            .send_bytes(self.uid, self.stream_id, bytes)
            .await;
        match code.into_result() {
            Ok(()) => {
                self.counters.sent.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(e) => {
                self.counters.send_rejected.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    uid = self.uid,
                    stream_id = self.stream_id,
                    desc = codes::send_code_description(code.0),
                    "{e}"
                );
                false
            }
        }
    }
}
