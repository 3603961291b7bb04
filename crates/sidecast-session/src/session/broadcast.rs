use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sidecast_core::error::{Result, SidecastError};

use crate::config::SessionConfig;
use crate::dispatch::SignalSender;
use crate::emitter::{BroadcastTimer, SurveyTrigger};
use crate::obs::{CountersSnapshot, SignalCounters};
use crate::sinks::{DisplaySink, OperatorSurface};
use crate::transport::{
    codes, JoinInfo, ParticipantId, Role, SessionEvent, SideChannelTransport, EVENT_QUEUE_DEPTH,
};

use super::{channel_credentials, join_drain_task, side_channel_spec};

/// Broadcaster lifecycle.
///
/// `start` joins the channel, opens the side channel, and arms the event
/// drain; the broadcast timer itself starts only when the transport reports
/// the first local frame. `stop` is deterministic: the timer is fully wound
/// down before the channel is left, so no signal is sent after it returns.
/// A stopped session can start again and begins a fresh run from zero.
///
/// `start`/`stop` are lifecycle edges meant to be driven by one owner;
/// concurrent calls to `start` are not supported.
pub struct BroadcastSession {
    cfg: SessionConfig,
    transport: Arc<dyn SideChannelTransport>,
    display: Arc<dyn DisplaySink>,
    operator: Arc<dyn OperatorSurface>,
    counters: Arc<SignalCounters>,
    live: Mutex<Option<Live>>,
    // Mirrors the host's mute toggles; reset at every start.
    video_muted: AtomicBool,
    audio_muted: AtomicBool,
}

struct Live {
    uid: ParticipantId,
    timer: Arc<BroadcastTimer>,
    survey: Arc<SurveyTrigger>,
    drain: JoinHandle<()>,
}

impl BroadcastSession {
    pub fn new(
        cfg: SessionConfig,
        transport: Arc<dyn SideChannelTransport>,
        display: Arc<dyn DisplaySink>,
        operator: Arc<dyn OperatorSurface>,
    ) -> Result<Self> {
        if let Err(e) = cfg.validate() {
            operator.notice(&format!("broadcast session refused: {e}"));
            return Err(e);
        }
        Ok(Self {
            cfg,
            transport,
            display,
            operator,
            counters: Arc::new(SignalCounters::new()),
            live: Mutex::new(None),
            video_muted: AtomicBool::new(false),
            audio_muted: AtomicBool::new(false),
        })
    }

    pub async fn start(&self) -> Result<JoinInfo> {
        if self.is_live() {
            return Err(SidecastError::State("broadcast session already live".into()));
        }

        let creds = channel_credentials(&self.cfg);
        let spec = side_channel_spec(&self.cfg);

        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let info = self
            .transport
            .join(&creds, Role::Broadcaster, 0, events_tx)
            .await?;

        // The side channel must exist before the first tick wants to send.
        // A start that fails here rolls the join back so nothing stays on
        // the channel.
        if let Err(e) = self.transport.open_side_channel(info.uid, spec).await {
            let _ = self.transport.leave(info.uid).await;
            return Err(e);
        }

        let sender = Arc::new(SignalSender::new(
            Arc::clone(&self.transport),
            info.uid,
            spec.stream_id,
            Arc::clone(&self.counters),
        ));
        let timer = Arc::new(BroadcastTimer::new(
            Arc::clone(&sender),
            Arc::clone(&self.display),
        ));
        let survey = Arc::new(SurveyTrigger::new(sender, Arc::clone(&self.operator)));

        self.video_muted.store(false, Ordering::Relaxed);
        self.audio_muted.store(false, Ordering::Relaxed);

        let drain = tokio::spawn(drain_events(
            events_rx,
            Arc::clone(&timer),
            Arc::clone(&self.operator),
        ));

        tracing::info!(
            uid = info.uid,
            channel = %self.cfg.credentials.channel,
            stream_id = spec.stream_id,
            "broadcast session live"
        );

        if let Ok(mut slot) = self.live.lock() {
            *slot = Some(Live {
                uid: info.uid,
                timer,
                survey,
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
            tracing::debug!("stop on an idle broadcast session");
            return Ok(());
        };

        // The timer winds down before we leave so no tick races teardown.
        // The drain is joined even when leave fails; the session must end
        // up idle either way.
        live.timer.stop().await;
        let left = self.transport.leave(live.uid).await;
        join_drain_task(live.drain).await;
        left?;

        tracing::info!(uid = live.uid, "broadcast session stopped");
        Ok(())
    }

    /// Fire the survey signal with the code the operator confirmed. A blank
    /// code is a cancelled prompt and triggers nothing; the configured
    /// default is exposed via [`survey_default_code`](Self::survey_default_code)
    /// for the host's prompt prefill.
    pub async fn prompt_survey(&self, code: &str) -> bool {
        let survey = {
            if let Ok(slot) = self.live.lock() {
                slot.as_ref().map(|l| Arc::clone(&l.survey))
            } else {
                None
            }
        };
        match survey {
            Some(s) => s.trigger(code).await,
            None => {
                tracing::warn!("survey prompt on an idle broadcast session");
                false
            }
        }
    }

    /// Code offered to the operator as the survey prefill.
    pub fn survey_default_code(&self) -> &str {
        &self.cfg.survey.default_code
    }

    pub async fn set_video_muted(&self, muted: bool) -> Result<()> {
        let uid = self.live_uid()?;
        self.transport.set_local_video_muted(uid, muted).await?;
        self.video_muted.store(muted, Ordering::Relaxed);
        Ok(())
    }

    pub async fn set_audio_muted(&self, muted: bool) -> Result<()> {
        let uid = self.live_uid()?;
        self.transport.set_local_audio_muted(uid, muted).await?;
        self.audio_muted.store(muted, Ordering::Relaxed);
        Ok(())
    }

    pub async fn switch_camera(&self) -> Result<()> {
        let uid = self.live_uid()?;
        self.transport.switch_camera(uid).await
    }

    pub fn video_muted(&self) -> bool {
        self.video_muted.load(Ordering::Relaxed)
    }

    pub fn audio_muted(&self) -> bool {
        self.audio_muted.load(Ordering::Relaxed)
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

    /// Whole seconds the current broadcast has been running.
    pub fn broadcast_elapsed(&self) -> u64 {
        if let Ok(slot) = self.live.lock() {
            slot.as_ref().map(|l| l.timer.elapsed_seconds()).unwrap_or(0)
        } else {
            0
        }
    }

    pub fn counters(&self) -> CountersSnapshot {
        self.counters.snapshot()
    }

    fn live_uid(&self) -> Result<ParticipantId> {
        if let Ok(slot) = self.live.lock() {
            if let Some(l) = slot.as_ref() {
                return Ok(l.uid);
            }
        }
        Err(SidecastError::State("broadcast session not live".into()))
    }
}

async fn drain_events(
    mut events: mpsc::Receiver<SessionEvent>,
    timer: Arc<BroadcastTimer>,
    operator: Arc<dyn OperatorSurface>,
) {
    while let Some(ev) = events.recv().await {
        match ev {
            SessionEvent::FirstLocalFrame => {
                // Local pipeline is live: the broadcast clock starts here.
                timer.start();
            }
            SessionEvent::FirstRemoteFrame { uid } => {
                // Another broadcaster's video inside our first second means
                // the channel was already occupied when we arrived.
                if timer.elapsed_seconds() < 1 {
                    tracing::warn!(uid, "channel already has a live broadcaster");
                    operator.stream_conflict(uid);
                } else {
                    tracing::debug!(uid, "remote frame decoded");
                }
            }
            SessionEvent::Bytes { uid, .. } => {
                // Broadcasters emit signals; they do not consume them.
                tracing::debug!(uid, "ignoring inbound side-channel payload");
            }
            SessionEvent::Offline { uid } => {
                tracing::debug!(uid, "participant offline");
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
