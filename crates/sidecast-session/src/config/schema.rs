use serde::Deserialize;
use sidecast_core::error::{Result, SidecastError};

use crate::transport::ParticipantId;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub version: u32,

    pub credentials: CredentialsSection,

    #[serde(default)]
    pub side_channel: SideChannelSection,

    #[serde(default)]
    pub survey: SurveySection,

    #[serde(default)]
    pub policy: PolicySection,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SidecastError::NotConfigured(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.credentials.validate()?;
        self.side_channel.validate()?;
        self.policy.validate()?;

        Ok(())
    }
}

/// Channel credentials. All three values must be present and nonempty:
/// a session refuses to start rather than attempt a join without a token.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsSection {
    pub app_id: String,

    pub token: String,

    pub channel: String,
}

impl CredentialsSection {
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(SidecastError::NotConfigured(
                "credentials.app_id must not be empty".into(),
            ));
        }
        if self.token.is_empty() {
            return Err(SidecastError::NotConfigured(
                "credentials.token must not be empty".into(),
            ));
        }
        if self.channel.is_empty() {
            return Err(SidecastError::NotConfigured(
                "credentials.channel must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideChannelSection {
    #[serde(default = "default_stream_id")]
    pub stream_id: u32,

    #[serde(default = "default_true")]
    pub reliable: bool,

    #[serde(default = "default_true")]
    pub ordered: bool,
}

impl Default for SideChannelSection {
    fn default() -> Self {
        Self {
            stream_id: default_stream_id(),
            reliable: default_true(),
            ordered: default_true(),
        }
    }
}

impl SideChannelSection {
    pub fn validate(&self) -> Result<()> {
        if self.stream_id == 0 {
            return Err(SidecastError::NotConfigured(
                "side_channel.stream_id must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

fn default_stream_id() -> u32 {
    10451
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveySection {
    #[serde(default = "default_survey_code")]
    pub default_code: String,
}

impl Default for SurveySection {
    fn default() -> Self {
        Self {
            default_code: default_survey_code(),
        }
    }
}

fn default_survey_code() -> String {
    "7FDV9CZ".into()
}

/// Who may inject signals into this session's side channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    #[serde(default)]
    pub signal_senders: SenderRule,

    #[serde(default)]
    pub allowed_uids: Vec<ParticipantId>,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            signal_senders: SenderRule::Any,
            allowed_uids: Vec::new(),
        }
    }
}

impl PolicySection {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.signal_senders, SenderRule::Allowlist) && self.allowed_uids.is_empty() {
            return Err(SidecastError::NotConfigured(
                "policy.allowed_uids must not be empty when signal_senders is allowlist".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRule {
    /// Accept signals from any participant (the wire contract carries no
    /// sender identity, so this is the historical behavior).
    #[default]
    Any,
    /// Accept signals only from the listed participant uids.
    Allowlist,
}
