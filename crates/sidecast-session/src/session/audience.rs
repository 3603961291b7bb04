use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sidecast_core::error::{Result, SidecastError};

use crate::config::SessionConfig;
use crate::dispatch::SignalRouter;
use crate::obs::{CountersSnapshot, SignalCounters};
use crate::policy::SenderPolicy;
use crate::sinks::{DisplaySink, OperatorSurface, SurveySink};
use crate::transport::{
    codes, JoinInfo, ParticipantId, Role, SessionEvent, SideChannelTransport, EVENT_QUEUE_DEPTH,
};

use super::{channel_credentials, join_drain_task};

/// Audience lifecycle.
///
/// Joins the channel and routes inbound side-channel payloads: timer ticks
/// to the display sink, survey triggers to the survey sink, everything else
/// counted and dropped. The first remote broadcaster frame marks the host;
/// the host going offline is surfaced to the operator.
pub struct AudienceSession {
    cfg: SessionConfig,
    transport: Arc<dyn SideChannelTransport>,
    router: Arc<SignalRouter>,
    operator: Arc<dyn OperatorSurface>,
    counters: Arc<SignalCounters>,
    live: Mutex<Option<Live>>,
}

struct Live {
    uid: ParticipantId,
    drain: JoinHandle<()>,
}

impl AudienceSession {
    pub fn new(
        cfg: SessionConfig,
        transport: Arc<dyn SideChannelTransport>,
        display: Arc<dyn DisplaySink>,
        survey: Arc<dyn SurveySink>,
        operator: Arc<dyn OperatorSurface>,
    ) -> Result<Self> {
        if let Err(e) = cfg.validate() {
            operator.notice(&format!("audience session refused: {e}"));
            return Err(e);
        }

        let counters = Arc::new(SignalCounters::new());
        let policy = Arc::new(SenderPolicy::compile(&cfg.policy));
        let router = Arc::new(SignalRouter::new(
            display,
            survey,
            policy,
            Arc::clone(&counters),
        ));

        Ok(Self {
            cfg,
            transport,
            router,
            operator,
            counters,
            live: Mutex::new(None),
        })
    }

    pub async fn start(&self) -> Result<JoinInfo> {
        if self.is_live() {
            return Err(SidecastError::State("audience session already live".into()));
        }

        let creds = channel_credentials(&self.cfg);
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let info = self
            .transport
            .join(&creds, Role::Audience, 0, events_tx)
            .await?;

        let drain = tokio::spawn(drain_events(
            events_rx,
            Arc::clone(&self.router),
            Arc::clone(&self.operator),
        ));

        tracing::info!(
            uid = info.uid,
            channel = %self.cfg.credentials.channel,
            "audience session live"
        );

        if let Ok(mut slot) = self.live.lock() {
            *slot = Some(Live {
                uid: info.uid,
                drain,
            });
        }
        Ok(info)
    }

    pub async fn stop(&self) -> Result<()> {
        let live = {
            if let Ok(mut slot) = self.live.lock() {
                slot.take()
            } else {
                None
            }
        };
        let Some(live) = live else {
            tracing::debug!("stop on an idle audience session");
            return Ok(());
        };

        // The drain is joined even when leave fails; the session must end
        // up idle either way.
        let left = self.transport.leave(live.uid).await;
        join_drain_task(live.drain).await;
        left?;

        tracing::info!(uid = live.uid, "audience session stopped");
        Ok(())
    }

    pub fn is_live(&self) -> bool {
        self.live.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    pub fn uid(&self) -> Option<ParticipantId> {
        if let Ok(slot) = self.live.lock() {
            slot.as_ref().map(|l| l.uid)
        } else {
            None
        }
    }

    pub fn counters(&self) -> CountersSnapshot {
        self.counters.snapshot()
    }
}

async fn drain_events(
    mut events: mpsc::Receiver<SessionEvent>,
    router: Arc<SignalRouter>,
    operator: Arc<dyn OperatorSurface>,
) {
    // The host is whichever broadcaster's frame decoded first.
    let mut host: Option<ParticipantId> = None;

    while let Some(ev) = events.recv().await {
        match ev {
            SessionEvent::FirstLocalFrame => {
                tracing::debug!("unexpected local frame for audience role");
            }
            SessionEvent::FirstRemoteFrame { uid } => {
                if host.is_none() {
                    host = Some(uid);
                    tracing::info!(uid, "watching broadcaster");
                }
            }
            SessionEvent::Bytes { uid, data, .. } => {
                router.dispatch(uid, &data);
            }
            SessionEvent::Offline { uid } => {
                if host == Some(uid) {
                    host = None;
                    tracing::info!(uid, "host went offline");
                    operator.notice("the broadcast has ended");
                } else {
                    tracing::debug!(uid, "participant offline");
                }
            }
            SessionEvent::Warning { code } => {
                tracing::warn!(
                    code,
                    desc = codes::warning_description(code),
                    "engine warning"
                );
            }
            SessionEvent::ErrorCode { code } => {
                let desc = codes::error_description(code);
                tracing::error!(code, desc, "engine error");
                operator.notice(desc);
            }
        }
    }
}
