//! Side-channel envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use sidecast_core::protocol::envelope::{Decoded, Envelope, SignalKind};

mod vector_loader;
use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn envelope_vectors() {
    let files = [
        "time_tick.json",
        "survey_trigger.json",
        "extra_keys.json",
        "unknown_type.json",
        "missing_data.json",
        "missing_type.json",
        "non_string_value.json",
        "top_level_array.json",
        "junk_bytes.json",
        "truncated_json.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = Envelope::decode(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code(), err.code, "vector={}", v.description);
            continue;
        }

        let decoded = res.expect("expected clean decode");
        let ex = v.expect.expect("missing expect block");

        if ex.get("foreign").and_then(|b| b.as_bool()) == Some(true) {
            assert_eq!(decoded, Decoded::Foreign, "vector={}", v.description);
            continue;
        }

        let Decoded::Signal(env) = decoded else {
            panic!("vector={}: expected a recognized signal", v.description);
        };
        assert_eq!(env.kind.as_str(), ex["kind"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(env.data, ex["data"].as_str().unwrap(), "vector={}", v.description);
    }
}

#[test]
fn encode_produces_the_exact_two_key_object() {
    let env = Envelope::new(SignalKind::BroadcastTime, " 01 : 05 ");
    let bytes = env.encode().unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"type":"broadcast_time","data":" 01 : 05 "}"#
    );
}

#[test]
fn round_trip_preserves_kind_and_payload() {
    for (kind, data) in [
        (SignalKind::BroadcastTime, " 00 : 01 "),
        (SignalKind::Questionnaire, "7FDV9CZ"),
        (SignalKind::BroadcastTime, ""),
        (SignalKind::Questionnaire, "code with \"quotes\" inside"),
    ] {
        let env = Envelope::new(kind, data);
        let bytes = env.encode().unwrap();
        assert_eq!(Envelope::decode(&bytes).unwrap(), Decoded::Signal(env));
    }
}

#[test]
fn kind_literals_are_stable() {
    assert_eq!(SignalKind::BroadcastTime.as_str(), "broadcast_time");
    assert_eq!(SignalKind::Questionnaire.as_str(), "questionnaire");
    assert_eq!(SignalKind::from_wire("broadcast_time"), Some(SignalKind::BroadcastTime));
    assert_eq!(SignalKind::from_wire("questionnaire"), Some(SignalKind::Questionnaire));
    assert_eq!(SignalKind::from_wire("viewer_count"), None);
}
