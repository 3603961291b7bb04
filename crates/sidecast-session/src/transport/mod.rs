//! Side-channel transport contract.
//!
//! The media engine itself lives outside this crate. What the session
//! runtime needs from it is narrow: join and leave a channel, open a thin
//! data stream next to the media tracks, push small byte payloads into that
//! stream, and surface a handful of engine callbacks. This module pins that
//! surface down so the rest of the crate can be driven equally by a real
//! engine adapter or by the in-process [`loopback`] hub.

pub mod codes;
pub mod loopback;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use sidecast_core::error::{Result, SidecastError};

pub use loopback::LoopbackHub;

/// Transport-level participant identifier. `0` asks the transport to assign
/// one at join.
pub type ParticipantId = u32;

/// Result code of a side-channel send. `0` means the transport accepted the
/// payload for delivery; any other value is a rejection. Acceptance is not
/// a delivery receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendCode(pub i32);

impl SendCode {
    pub const ACCEPTED: SendCode = SendCode(0);

    pub fn accepted(self) -> bool {
        self.0 == 0
    }

    /// Map a rejection into [`SidecastError::SendRejected`].
    pub fn into_result(self) -> Result<()> {
        if self.accepted() {
            Ok(())
        } else {
            Err(SidecastError::SendRejected(self.0))
        }
    }
}

/// What a session presents when joining a channel. Sessions validate the
/// token nonempty before any transport work; the transport itself takes it
/// as-is.
#[derive(Debug, Clone)]
pub struct ChannelCredentials {
    pub app_id: String,
    pub token: String,
    pub channel: String,
}

/// Role within the live channel. Only broadcasters publish media and emit
/// side-channel signals; the audience receives both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Broadcaster,
    Audience,
}

/// Outcome of a successful join.
#[derive(Debug, Clone, Copy)]
pub struct JoinInfo {
    /// The uid this participant is known by on the channel.
    pub uid: ParticipantId,
    /// Milliseconds the join took.
    pub elapsed_ms: u64,
}

/// Parameters of the data stream opened next to the media tracks.
#[derive(Debug, Clone, Copy)]
pub struct SideChannelSpec {
    pub stream_id: u32,
    /// Delivery is retried within the transport's window.
    pub reliable: bool,
    /// Payloads arrive in send order per sender.
    pub ordered: bool,
}

/// Engine callbacks, delivered in order through a queue the session drains.
///
/// The variants mirror the callbacks a live engine raises: local preview up,
/// a remote broadcaster's first decoded frame, inbound stream payloads, a
/// broadcaster going offline, and engine diagnostics.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The local video pipeline produced its first frame. Broadcasters treat
    /// this as "the broadcast is live".
    FirstLocalFrame,
    /// First decoded frame of a remote broadcaster.
    FirstRemoteFrame { uid: ParticipantId },
    /// A side-channel payload addressed to this participant.
    Bytes {
        uid: ParticipantId,
        stream_id: u32,
        data: Bytes,
    },
    /// A broadcaster left or dropped off the channel.
    Offline { uid: ParticipantId },
    /// Engine warning. Informational.
    Warning { code: i32 },
    /// Engine error. Usually worth surfacing to the operator.
    ErrorCode { code: i32 },
}

/// Queue the transport pushes [`SessionEvent`]s into.
pub type EventSender = mpsc::Sender<SessionEvent>;

/// Depth of a participant's event queue. Events queue up while a session
/// finishes wiring itself after `join` returns, so this must comfortably
/// cover the burst a join can produce.
pub const EVENT_QUEUE_DEPTH: usize = 64;

/// The narrow engine surface the session runtime drives.
///
/// Joining hands the transport an event queue; everything the engine wants
/// to tell the session flows through it afterwards, in order. The transport
/// must stop pushing events for a uid once `leave` completes and must drop
/// the queue sender so the session's drain loop terminates.
#[async_trait]
pub trait SideChannelTransport: Send + Sync {
    /// Join `creds.channel`. A `uid` of 0 requests assignment.
    async fn join(
        &self,
        creds: &ChannelCredentials,
        role: Role,
        uid: ParticipantId,
        events: EventSender,
    ) -> Result<JoinInfo>;

    /// Leave the channel. Idempotent.
    async fn leave(&self, uid: ParticipantId) -> Result<()>;

    /// Open the data stream this participant will send on. Must be called
    /// before `send_bytes` can succeed for that stream.
    async fn open_side_channel(&self, uid: ParticipantId, spec: SideChannelSpec) -> Result<()>;

    /// Push one payload to every other participant on the channel.
    async fn send_bytes(&self, uid: ParticipantId, stream_id: u32, bytes: Bytes) -> SendCode;

    /// Pause or resume the local video track.
    async fn set_local_video_muted(&self, uid: ParticipantId, muted: bool) -> Result<()>;

    /// Pause or resume the local audio track.
    async fn set_local_audio_muted(&self, uid: ParticipantId, muted: bool) -> Result<()>;

    /// Flip between front and rear capture.
    async fn switch_camera(&self, uid: ParticipantId) -> Result<()>;
}
