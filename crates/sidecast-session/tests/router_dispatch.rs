//! Inbound signal routing tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use sidecast_core::protocol::envelope::{Envelope, SignalKind};
use sidecast_session::config::{PolicySection, SenderRule};
use sidecast_session::dispatch::SignalRouter;
use sidecast_session::obs::SignalCounters;
use sidecast_session::policy::SenderPolicy;

use recording::{RecordingDisplay, RecordingSurvey};

struct Rig {
    display: Arc<RecordingDisplay>,
    survey: Arc<RecordingSurvey>,
    counters: Arc<SignalCounters>,
    router: SignalRouter,
}

fn rig_with(policy: PolicySection) -> Rig {
    let display = Arc::new(RecordingDisplay::default());
    let survey = Arc::new(RecordingSurvey::default());
    let counters = Arc::new(SignalCounters::new());
    let router = SignalRouter::new(
        display.clone(),
        survey.clone(),
        Arc::new(SenderPolicy::compile(&policy)),
        counters.clone(),
    );
    Rig {
        display,
        survey,
        counters,
        router,
    }
}

fn rig() -> Rig {
    rig_with(PolicySection::default())
}

fn encoded(kind: SignalKind, data: &str) -> Vec<u8> {
    Envelope::new(kind, data).encode().unwrap().to_vec()
}

#[test]
fn time_tick_reaches_display_and_reveals_it() {
    let r = rig();
    assert!(!r.display.visible());

    r.router
        .dispatch(5, &encoded(SignalKind::BroadcastTime, " 00 : 07 "));

    assert_eq!(r.display.texts(), vec![" 00 : 07 "]);
    assert!(r.display.visible());
    assert!(r.survey.codes().is_empty());
    assert_eq!(r.counters.snapshot().delivered, 1);
}

#[test]
fn survey_trigger_reaches_survey_sink() {
    let r = rig();

    r.router
        .dispatch(5, &encoded(SignalKind::Questionnaire, "7FDV9CZ"));

    assert_eq!(r.survey.codes(), vec!["7FDV9CZ"]);
    assert!(r.display.texts().is_empty());
    assert_eq!(r.counters.snapshot().delivered, 1);
}

#[test]
fn foreign_payload_is_counted_and_ignored() {
    let r = rig();

    r.router
        .dispatch(5, br#"{"type":"chat_line","data":"hello"}"#);
    r.router.dispatch(5, br#"{"data":" 00 : 01 "}"#);

    let snap = r.counters.snapshot();
    assert_eq!(snap.foreign, 2);
    assert_eq!(snap.delivered, 0);
    assert!(r.display.texts().is_empty());
    assert!(!r.display.visible());
    assert!(r.survey.codes().is_empty());
}

#[test]
fn undecodable_payload_is_counted_as_noise() {
    let r = rig();

    r.router.dispatch(5, b"not json at all");
    r.router.dispatch(5, br#"{"type":"broadcast_time","data":42}"#);

    let snap = r.counters.snapshot();
    assert_eq!(snap.decode_noise, 2);
    assert_eq!(snap.delivered, 0);
    assert!(r.display.texts().is_empty());
}

#[test]
fn allowlist_drops_unlisted_senders() {
    let r = rig_with(PolicySection {
        signal_senders: SenderRule::Allowlist,
        allowed_uids: vec![7],
    });
    let tick = encoded(SignalKind::BroadcastTime, " 00 : 01 ");

    r.router.dispatch(9, &tick);
    assert_eq!(r.counters.snapshot().policy_dropped, 1);
    assert!(r.display.texts().is_empty());

    r.router.dispatch(7, &tick);
    assert_eq!(r.counters.snapshot().delivered, 1);
    assert_eq!(r.display.texts(), vec![" 00 : 01 "]);
}

#[test]
fn policy_gate_runs_before_any_decode() {
    let r = rig_with(PolicySection {
        signal_senders: SenderRule::Allowlist,
        allowed_uids: vec![7],
    });

    // Garbage from an unlisted sender is dropped at the gate; it never
    // reaches the decoder, so it cannot show up as decode noise.
    r.router.dispatch(9, b"not json at all");

    let snap = r.counters.snapshot();
    assert_eq!(snap.policy_dropped, 1);
    assert_eq!(snap.decode_noise, 0);
    assert_eq!(snap.delivered, 0);
}
