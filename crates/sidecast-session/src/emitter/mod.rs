//! Broadcaster-side signal emitters.
//!
//! The timer ticks out the broadcast duration once a second; the survey
//! trigger fires once per operator prompt. Both go through the same
//! [`crate::dispatch::SignalSender`].

pub mod survey;
pub mod timer;

pub use survey::SurveyTrigger;
pub use timer::{BroadcastTimer, TICK_PERIOD};
