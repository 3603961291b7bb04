//! Session config loader (strict parsing).

pub mod schema;

use std::fs;

use sidecast_core::error::{Result, SidecastError};

pub use schema::{PolicySection, SenderRule, SessionConfig, SideChannelSection, SurveySection};

pub fn load_from_file(path: &str) -> Result<SessionConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SidecastError::NotConfigured(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SessionConfig> {
    let cfg: SessionConfig = serde_yaml::from_str(s)
        .map_err(|e| SidecastError::NotConfigured(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
