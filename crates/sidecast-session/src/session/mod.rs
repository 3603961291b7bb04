//! Session lifecycles.
//!
//! A broadcaster joins, opens the side channel, and emits signals; an
//! audience member joins and routes whatever arrives. Both drain their
//! transport event queue on a dedicated task that ends when the transport
//! drops the queue sender after `leave`.

pub mod audience;
pub mod broadcast;

pub use audience::AudienceSession;
pub use broadcast::BroadcastSession;

use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use crate::config::SessionConfig;
use crate::transport::{ChannelCredentials, SideChannelSpec};

/// How long `stop` waits for the event drain task after leaving the channel.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

fn channel_credentials(cfg: &SessionConfig) -> ChannelCredentials {
    ChannelCredentials {
        app_id: cfg.credentials.app_id.clone(),
        token: cfg.credentials.token.clone(),
        channel: cfg.credentials.channel.clone(),
    }
}

fn side_channel_spec(cfg: &SessionConfig) -> SideChannelSpec {
    SideChannelSpec {
        stream_id: cfg.side_channel.stream_id,
        reliable: cfg.side_channel.reliable,
        ordered: cfg.side_channel.ordered,
    }
}

/// Wait for the drain task; a transport that never closes the event queue
/// only costs us the grace period.
async fn join_drain_task(mut task: JoinHandle<()>) {
    if timeout(DRAIN_GRACE, &mut task).await.is_err() {
        tracing::warn!("event drain task did not finish in time; aborting it");
        task.abort();
    }
}
