#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sidecast_session::config::{self, SenderRule};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: "main-hall"
side_channel:
  streem_id: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn ok_minimal_config_fills_defaults() {
    let ok = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: "main-hall"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.credentials.app_id, "demo-app");
    assert_eq!(cfg.credentials.token, "demo-token");
    assert_eq!(cfg.credentials.channel, "main-hall");
    assert_eq!(cfg.side_channel.stream_id, 10451);
    assert!(cfg.side_channel.reliable);
    assert!(cfg.side_channel.ordered);
    assert_eq!(cfg.survey.default_code, "7FDV9CZ");
    assert_eq!(cfg.policy.signal_senders, SenderRule::Any);
    assert!(cfg.policy.allowed_uids.is_empty());
}

#[test]
fn empty_channel_is_refused() {
    let bad = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: ""
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn empty_app_id_is_refused() {
    let bad = r#"
version: 1
credentials:
  app_id: ""
  token: "demo-token"
  channel: "main-hall"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn empty_token_is_refused() {
    let bad = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: ""
  channel: "main-hall"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
    assert!(err.to_string().contains("token"));
}

#[test]
fn missing_token_is_refused() {
    let bad = r#"
version: 1
credentials:
  app_id: "demo-app"
  channel: "main-hall"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn unsupported_version_is_refused() {
    let bad = r#"
version: 2
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: "main-hall"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn allowlist_without_uids_is_refused() {
    let bad = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: "main-hall"
policy:
  signal_senders: allowlist
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "NOT_CONFIGURED");
}

#[test]
fn allowlist_with_uids_parses() {
    let ok = r#"
version: 1
credentials:
  app_id: "demo-app"
  token: "demo-token"
  channel: "main-hall"
policy:
  signal_senders: allowlist
  allowed_uids: [7, 9]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.policy.signal_senders, SenderRule::Allowlist);
    assert_eq!(cfg.policy.allowed_uids, vec![7, 9]);
}
