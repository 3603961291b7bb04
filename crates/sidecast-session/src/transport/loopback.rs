//! In-process loopback transport.
//!
//! Stands in for a real media engine during tests and demo runs: a hub keyed
//! by participant uid fans side-channel payloads out to everyone else on the
//! channel and synthesizes the first-frame callbacks a live engine would
//! raise. No media flows; only the signaling surface is modeled.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::time::{timeout, Duration};

use sidecast_core::error::{Result, SidecastError};

use super::codes;
use super::{
    ChannelCredentials, EventSender, JoinInfo, ParticipantId, Role, SendCode, SessionEvent,
    SideChannelSpec, SideChannelTransport,
};

/// Per-message byte cap, matching the 1 KiB limit engines place on data
/// stream payloads.
pub const MAX_SIGNAL_BYTES: usize = 1024;

/// How long a slow participant may block reliable fan-out before the hub
/// gives up on that one delivery.
const DELIVERY_TIMEOUT_MS: u64 = 1500;

struct Participant {
    channel: String,
    role: Role,
    events: EventSender,
    streams: DashSet<u32>,
    video_muted: AtomicBool,
    audio_muted: AtomicBool,
    front_camera: AtomicBool,
}

/// Loopback hub shared by every session in a process.
///
/// Uids are hub-global: an explicit uid can be requested at join, `0` asks
/// the hub to assign the next free one. Delivery per receiver preserves
/// send order, so an `ordered` side channel holds per-receiver ordering.
pub struct LoopbackHub {
    participants: DashMap<ParticipantId, Participant>,
    channels: DashMap<String, DashSet<ParticipantId>>,
    next_uid: AtomicU32,
}

impl LoopbackHub {
    pub fn new() -> Self {
        Self {
            participants: DashMap::new(),
            channels: DashMap::new(),
            next_uid: AtomicU32::new(1),
        }
    }

    /// Current roster size of a channel.
    pub fn participant_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map(|s| s.len()).unwrap_or(0)
    }

    pub fn video_muted(&self, uid: ParticipantId) -> Option<bool> {
        self.participants
            .get(&uid)
            .map(|p| p.video_muted.load(Ordering::Relaxed))
    }

    pub fn audio_muted(&self, uid: ParticipantId) -> Option<bool> {
        self.participants
            .get(&uid)
            .map(|p| p.audio_muted.load(Ordering::Relaxed))
    }

    pub fn front_camera(&self, uid: ParticipantId) -> Option<bool> {
        self.participants
            .get(&uid)
            .map(|p| p.front_camera.load(Ordering::Relaxed))
    }

    fn assign_uid(&self) -> ParticipantId {
        loop {
            let uid = self.next_uid.fetch_add(1, Ordering::Relaxed);
            if !self.participants.contains_key(&uid) {
                return uid;
            }
        }
    }

    /// Event senders of everyone on `channel` except `exclude`. Guards are
    /// dropped before the caller awaits anything.
    fn channel_event_senders(&self, channel: &str, exclude: ParticipantId) -> Vec<EventSender> {
        let Some(members) = self.channels.get(channel) else {
            return Vec::new();
        };
        let uids: Vec<ParticipantId> = members
            .iter()
            .map(|m| *m.key())
            .filter(|u| *u != exclude)
            .collect();
        drop(members);

        uids.into_iter()
            .filter_map(|u| self.participants.get(&u).map(|p| p.events.clone()))
            .collect()
    }
}

impl Default for LoopbackHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SideChannelTransport for LoopbackHub {
    async fn join(
        &self,
        creds: &ChannelCredentials,
        role: Role,
        uid: ParticipantId,
        events: EventSender,
    ) -> Result<JoinInfo> {
        let started = Instant::now();

        if creds.app_id.is_empty() {
            return Err(SidecastError::Transport("join rejected: empty app id".into()));
        }
        if creds.channel.is_empty() {
            return Err(SidecastError::Transport("join rejected: empty channel".into()));
        }
        // The loopback hub has no auth backend; the token is taken as-is.
        // Sessions already refuse to start without one.

        let uid = if uid == 0 { self.assign_uid() } else { uid };

        match self.participants.entry(uid) {
            Entry::Occupied(_) => {
                return Err(SidecastError::Transport(format!(
                    "join rejected: uid {uid} already on a channel"
                )));
            }
            Entry::Vacant(v) => {
                v.insert(Participant {
                    channel: creds.channel.clone(),
                    role,
                    events: events.clone(),
                    streams: DashSet::new(),
                    video_muted: AtomicBool::new(false),
                    audio_muted: AtomicBool::new(false),
                    front_camera: AtomicBool::new(true),
                });
            }
        }

        // Synthesize the first-frame callbacks a live engine would raise.
        // The joiner's own queue sees the local frame first, then one remote
        // frame per broadcaster already live; live peers see the joiner's
        // frame if the joiner broadcasts.
        let mut to_joiner: Vec<SessionEvent> = Vec::new();
        if role == Role::Broadcaster {
            to_joiner.push(SessionEvent::FirstLocalFrame);
        }

        let mut to_peers: Vec<(EventSender, SessionEvent)> = Vec::new();
        {
            let members = self.channels.entry(creds.channel.clone()).or_default();
            for m in members.iter() {
                let other = *m.key();
                let Some(p) = self.participants.get(&other) else {
                    continue;
                };
                if p.role == Role::Broadcaster {
                    to_joiner.push(SessionEvent::FirstRemoteFrame { uid: other });
                }
                if role == Role::Broadcaster {
                    to_peers.push((p.events.clone(), SessionEvent::FirstRemoteFrame { uid }));
                }
            }
            members.insert(uid);
        }

        for ev in to_joiner {
            let _ = events.send(ev).await;
        }
        for (tx, ev) in to_peers {
            let _ = tx.send(ev).await;
        }

        tracing::debug!(uid, channel = %creds.channel, ?role, "loopback join");
        Ok(JoinInfo {
            uid,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn leave(&self, uid: ParticipantId) -> Result<()> {
        let Some((_, p)) = self.participants.remove(&uid) else {
            return Ok(());
        };

        if let Some(members) = self.channels.get(&p.channel) {
            members.remove(&uid);
            drop(members);
            self.channels.remove_if(&p.channel, |_, s| s.is_empty());
        }

        // Only broadcasters are visible enough on a live channel to produce
        // an offline callback for the others.
        if p.role == Role::Broadcaster {
            for tx in self.channel_event_senders(&p.channel, uid) {
                let _ = tx.send(SessionEvent::Offline { uid }).await;
            }
        }

        tracing::debug!(uid, channel = %p.channel, "loopback leave");
        Ok(())
    }

    async fn open_side_channel(&self, uid: ParticipantId, spec: SideChannelSpec) -> Result<()> {
        let p = self
            .participants
            .get(&uid)
            .ok_or_else(|| not_joined(uid))?;
        p.streams.insert(spec.stream_id);
        tracing::debug!(
            uid,
            stream_id = spec.stream_id,
            reliable = spec.reliable,
            ordered = spec.ordered,
            "side channel open"
        );
        Ok(())
    }

    async fn send_bytes(&self, uid: ParticipantId, stream_id: u32, bytes: Bytes) -> SendCode {
        let channel = {
            let Some(p) = self.participants.get(&uid) else {
                return SendCode(codes::SEND_ERR_NOT_JOINED);
            };
            if !p.streams.contains(&stream_id) {
                return SendCode(codes::SEND_ERR_NO_SIDE_CHANNEL);
            }
            p.channel.clone()
        };

        if bytes.len() > MAX_SIGNAL_BYTES {
            return SendCode(codes::SEND_ERR_PAYLOAD_TOO_LARGE);
        }

        // Reliable fan-out: deliver concurrently, give up per receiver after
        // a timeout. A closed queue means that participant is leaving and is
        // not an error.
        let mut futs = FuturesUnordered::new();
        for tx in self.channel_event_senders(&channel, uid) {
            let ev = SessionEvent::Bytes {
                uid,
                stream_id,
                data: bytes.clone(),
            };
            futs.push(async move {
                timeout(Duration::from_millis(DELIVERY_TIMEOUT_MS), tx.send(ev))
                    .await
                    .is_ok()
            });
        }

        let mut timed_out = 0usize;
        while let Some(delivered) = futs.next().await {
            if !delivered {
                timed_out += 1;
            }
        }
        if timed_out > 0 {
            tracing::warn!(uid, stream_id, timed_out, "fan-out skipped slow participants");
        }

        SendCode::ACCEPTED
    }

    async fn set_local_video_muted(&self, uid: ParticipantId, muted: bool) -> Result<()> {
        let p = self
            .participants
            .get(&uid)
            .ok_or_else(|| not_joined(uid))?;
        p.video_muted.store(muted, Ordering::Relaxed);
        Ok(())
    }

    async fn set_local_audio_muted(&self, uid: ParticipantId, muted: bool) -> Result<()> {
        let p = self
            .participants
            .get(&uid)
            .ok_or_else(|| not_joined(uid))?;
        p.audio_muted.store(muted, Ordering::Relaxed);
        Ok(())
    }

    async fn switch_camera(&self, uid: ParticipantId) -> Result<()> {
        let p = self
            .participants
            .get(&uid)
            .ok_or_else(|| not_joined(uid))?;
        p.front_camera.fetch_xor(true, Ordering::Relaxed);
        Ok(())
    }
}

fn not_joined(uid: ParticipantId) -> SidecastError {
    SidecastError::Transport(format!("uid {uid} not joined"))
}
