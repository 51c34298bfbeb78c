// Background refresh worker for serve mode.
// Re-parses the status file on an interval and publishes the result to a shared store.

use crate::models::StatusSnapshot;
use crate::parser::StatusParser;
use crate::source::StatusSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};

/// Latest snapshot, shared between the worker and HTTP handlers.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: RwLock<Option<Arc<StatusSnapshot>>>,
    refreshes_total: AtomicU64,
    failures_total: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the first successful refresh.
    pub async fn latest(&self) -> Option<Arc<StatusSnapshot>> {
        self.latest.read().await.clone()
    }

    pub async fn publish(&self, snapshot: StatusSnapshot) {
        *self.latest.write().await = Some(Arc::new(snapshot));
        self.refreshes_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn refreshes_total(&self) -> u64 {
        self.refreshes_total.load(Ordering::Relaxed)
    }

    pub fn failures_total(&self) -> u64 {
        self.failures_total.load(Ordering::Relaxed)
    }
}

/// Parser, store, and shutdown for the worker.
pub struct WorkerDeps<S> {
    pub parser: Arc<StatusParser<S>>,
    pub store: Arc<SnapshotStore>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub refresh_interval_ms: u64,
    /// How often to log refresh stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Parses once and publishes. On failure the previous snapshot stays in place.
pub async fn refresh_once<S: StatusSource>(
    parser: &StatusParser<S>,
    store: &SnapshotStore,
) -> anyhow::Result<()> {
    match parser.parse().await {
        Ok(snapshot) => {
            if !snapshot.is_complete() {
                tracing::warn!(
                    operation = "refresh",
                    dropped_blocks = snapshot.diagnostics().len(),
                    "status parsed with dropped blocks"
                );
            }
            store.publish(snapshot).await;
            Ok(())
        }
        Err(e) => {
            store.failures_total.fetch_add(1, Ordering::Relaxed);
            Err(e.into())
        }
    }
}

pub fn spawn<S>(deps: WorkerDeps<S>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    S: StatusSource + 'static,
{
    let WorkerDeps {
        parser,
        store,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        refresh_interval_ms,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(refresh_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = refresh_once(&parser, &store).await {
                        tracing::warn!(
                            error = %e,
                            operation = "refresh",
                            "status refresh failed; keeping previous snapshot"
                        );
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Refresh worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        refreshes_total = store.refreshes_total(),
                        failures_total = store.failures_total(),
                        "refresh stats"
                    );
                }
            }
        }
    })
}
