//! sidecast demo binary.
//!
//! Rehearses a complete live session over the in-process loopback hub: a
//! broadcaster joins and starts ticking, an audience member joins and sees
//! the readout, the operator fires the survey trigger, and both sides wind
//! down cleanly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use sidecast_session::config;
use sidecast_session::emitter::survey::survey_url;
use sidecast_session::session::{AudienceSession, BroadcastSession};
use sidecast_session::sinks::{DisplaySink, OperatorSurface, SurveySink};
use sidecast_session::transport::{LoopbackHub, ParticipantId};

/// Display sink that logs the readout instead of drawing a label.
struct LogDisplay {
    who: &'static str,
    visible: AtomicBool,
}

impl LogDisplay {
    fn new(who: &'static str) -> Self {
        Self {
            who,
            visible: AtomicBool::new(false),
        }
    }
}

impl DisplaySink for LogDisplay {
    fn set_timer_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::Relaxed) != visible {
            tracing::info!(who = self.who, visible, "timer readout visibility changed");
        }
    }

    fn show_elapsed(&self, text: &str) {
        tracing::info!(who = self.who, text, "timer readout");
    }
}

struct LogSurvey;

impl SurveySink for LogSurvey {
    fn open_survey(&self, code: &str) {
        tracing::info!(url = %survey_url(code), "opening survey");
    }
}

struct LogOperator {
    who: &'static str,
}

impl OperatorSurface for LogOperator {
    fn notice(&self, text: &str) {
        tracing::info!(who = self.who, "notice: {text}");
    }

    fn stream_conflict(&self, uid: ParticipantId) {
        tracing::warn!(who = self.who, uid, "channel is in use by another broadcaster");
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("sidecast.yaml").expect("config load failed");

    let hub = Arc::new(LoopbackHub::new());

    let stage = BroadcastSession::new(
        cfg.clone(),
        hub.clone(),
        Arc::new(LogDisplay::new("stage")),
        Arc::new(LogOperator { who: "stage" }),
    )
    .expect("broadcast session build failed");

    let floor = AudienceSession::new(
        cfg.clone(),
        hub.clone(),
        Arc::new(LogDisplay::new("floor")),
        Arc::new(LogSurvey),
        Arc::new(LogOperator { who: "floor" }),
    )
    .expect("audience session build failed");

    let info = stage.start().await.expect("broadcast start failed");
    tracing::info!(uid = info.uid, "broadcasting");
    tokio::time::sleep(Duration::from_millis(3200)).await;

    let info = floor.start().await.expect("audience start failed");
    tracing::info!(uid = info.uid, "watching");
    tokio::time::sleep(Duration::from_millis(2200)).await;

    // Stand-in for the operator confirming the prompt with its prefill.
    let code = stage.survey_default_code().to_string();
    tracing::info!(prefill = %code, "prompting for feedback");
    let delivered = stage.prompt_survey(&code).await;
    tracing::info!(delivered, "survey prompt result");
    tokio::time::sleep(Duration::from_millis(600)).await;

    floor.stop().await.expect("audience stop failed");
    stage.stop().await.expect("broadcast stop failed");

    tracing::info!(
        stage = ?stage.counters(),
        floor = ?floor.counters(),
        "session counters"
    );
}
