//! Output ports for decoded signals and operator-facing notices.
//!
//! Rendering is out of scope for this crate: the router and the session
//! lifecycles push text through these traits and a host application decides
//! what a "label" or an "alert" actually is. The demo binary and the tests
//! plug in logging and recording implementations.

use crate::transport::ParticipantId;

/// Receives the broadcast-duration readout.
pub trait DisplaySink: Send + Sync {
    /// Reveal or hide the readout. Called with `true` on every delivered
    /// tick, mirroring a label that stays hidden until the first one lands.
    fn set_timer_visible(&self, visible: bool);

    /// Update the readout text, always in the `" MM : SS "` shape.
    fn show_elapsed(&self, text: &str);
}

/// Receives a survey trigger on the audience side.
pub trait SurveySink: Send + Sync {
    /// Open the survey identified by `code`. The code is opaque here;
    /// [`crate::emitter::survey::survey_url`] turns it into a URL.
    fn open_survey(&self, code: &str);
}

/// Operator-facing notices (alerts in a UI host, log lines in the demo).
pub trait OperatorSurface: Send + Sync {
    fn notice(&self, text: &str);

    /// Another broadcaster is already live on the channel.
    fn stream_conflict(&self, uid: ParticipantId);
}
