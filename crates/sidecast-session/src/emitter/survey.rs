use std::sync::Arc;

use sidecast_core::protocol::envelope::SignalKind;

use crate::dispatch::SignalSender;
use crate::sinks::OperatorSurface;

/// Base URL survey codes resolve against on the audience side.
pub const SURVEY_URL_BASE: &str = "https://www.surveymonkey.com/r/";

/// Full survey URL for a code.
pub fn survey_url(code: &str) -> String {
    format!("{SURVEY_URL_BASE}{code}")
}

/// One-shot survey signal, fired when the operator asks for feedback.
pub struct SurveyTrigger {
    sender: Arc<SignalSender>,
    operator: Arc<dyn OperatorSurface>,
}

impl SurveyTrigger {
    pub fn new(sender: Arc<SignalSender>, operator: Arc<dyn OperatorSurface>) -> Self {
        Self { sender, operator }
    }

    /// Send a `questionnaire` signal carrying `code`. A blank code means the
    /// operator cancelled or cleared the prompt; nothing goes out. One
    /// envelope per call; a rejected send is reported to the operator and
    /// not retried.
    pub async fn trigger(&self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            tracing::debug!("blank survey code; nothing sent");
            return false;
        }

        tracing::info!(code, "sending survey trigger");
        let ok = self.sender.send(SignalKind::Questionnaire, code).await;
        if ok {
            self.operator.notice("survey trigger broadcast to the audience");
        } else {
            self.operator.notice("survey trigger was not delivered; try again");
        }
        ok
    }
}
