//! Lightweight in-process observability.
//!
//! Structured logs go through `tracing`; this module adds the handful of
//! atomic counters a session keeps about its side-channel traffic. No
//! exposition endpoint: callers pull a snapshot when they want one.

pub mod counters;

pub use counters::{CountersSnapshot, SignalCounters};
