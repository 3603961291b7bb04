use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

use sidecast_core::protocol::clock::BroadcastClock;
use sidecast_core::protocol::envelope::SignalKind;

use crate::dispatch::SignalSender;
use crate::sinks::DisplaySink;

/// Fixed cadence of the broadcast timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic broadcast-duration emitter.
///
/// Idle until [`start`](Self::start), which arms a once-a-second loop: each
/// tick advances the clock, pushes the `" MM : SS "` readout to the local
/// display and sends it as a `broadcast_time` signal. A rejected send is
/// logged and skipped; the loop never retries and never stops on its own.
///
/// [`stop`](Self::stop) is deterministic and terminal: once it returns, no
/// further tick is displayed or sent, and a later `start` on the same timer
/// is refused. Sessions build a fresh timer per run, so a restart still
/// begins from zero.
pub struct BroadcastTimer {
    sender: Arc<SignalSender>,
    display: Arc<dyn DisplaySink>,
    elapsed: Arc<AtomicU64>,
    running: Mutex<Option<RunningTimer>>,
    disarmed: AtomicBool,
}

struct RunningTimer {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl BroadcastTimer {
    pub fn new(sender: Arc<SignalSender>, display: Arc<dyn DisplaySink>) -> Self {
        Self {
            sender,
            display,
            elapsed: Arc::new(AtomicU64::new(0)),
            running: Mutex::new(None),
            disarmed: AtomicBool::new(false),
        }
    }

    /// Arm the tick loop. A second start while running is ignored, so a
    /// duplicate first-frame callback cannot double the cadence. A start
    /// after `stop` is refused: the first-frame callback may still be in
    /// flight when a session tears down, and it must not revive the loop.
    pub fn start(&self) {
        let Ok(mut slot) = self.running.lock() else {
            return;
        };
        if self.disarmed.load(Ordering::Relaxed) {
            tracing::debug!("broadcast timer is already wound down");
            return;
        }
        if slot.is_some() {
            tracing::debug!("broadcast timer already running");
            return;
        }

        let sender = Arc::clone(&self.sender);
        let display = Arc::clone(&self.display);
        let elapsed = Arc::clone(&self.elapsed);
        elapsed.store(0, Ordering::Relaxed);

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut clock = BroadcastClock::new();
            let mut ticker = time::interval(TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval yields immediately once; consume that so the
            // first emission lands one full period after start.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        let text = clock.tick();
                        elapsed.store(clock.elapsed_seconds(), Ordering::Relaxed);
                        display.show_elapsed(&text);
                        // A rejected tick is not retried.
                        let _ = sender.send(SignalKind::BroadcastTime, &text).await;
                    }
                }
            }
        });

        tracing::info!("broadcast timer started");
        *slot = Some(RunningTimer { stop_tx, task });
    }

    /// Disarm the tick loop and wait for it to wind down.
    pub async fn stop(&self) {
        let running = {
            if let Ok(mut slot) = self.running.lock() {
                self.disarmed.store(true, Ordering::Relaxed);
                slot.take()
            } else {
                None
            }
        };
        let Some(running) = running else {
            return;
        };

        let _ = running.stop_tx.send(true);
        let _ = running.task.await;
        self.elapsed.store(0, Ordering::Relaxed);
        tracing::info!("broadcast timer stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Whole seconds since the current run started. Zero when idle.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }
}
