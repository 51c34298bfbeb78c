// Worker tests: refresh, failure handling, shutdown

mod common;

use common::{STATUS_DAT, write_status_file};
use nagios_status::StatusParser;
use nagios_status::worker::{SnapshotStore, WorkerConfig, WorkerDeps, refresh_once, spawn};
use std::sync::Arc;

#[tokio::test]
async fn refresh_once_publishes_snapshot() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_status_file(&dir, STATUS_DAT);
    let parser = StatusParser::from_path(&path);
    let store = SnapshotStore::new();

    assert!(store.latest().await.is_none());
    refresh_once(&parser, &store).await.unwrap();
    let latest = store.latest().await.expect("published");
    assert_eq!(latest.hosts.len(), 2);
    assert_eq!(store.refreshes_total(), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_status_file(&dir, STATUS_DAT);
    let parser = StatusParser::from_path(&path);
    let store = SnapshotStore::new();
    refresh_once(&parser, &store).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(refresh_once(&parser, &store).await.is_err());
    assert_eq!(store.failures_total(), 1);
    assert_eq!(store.latest().await.expect("kept").hosts.len(), 2);
}

#[tokio::test]
async fn worker_spawn_refreshes_and_shuts_down() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_status_file(&dir, "info {\n\tcreated=1\n\t}\n");
    let parser = Arc::new(StatusParser::from_path(&path));
    let store = Arc::new(SnapshotStore::new());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            parser,
            store: store.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            refresh_interval_ms: 20,
            stats_log_interval_secs: 3600,
        },
    );

    wait_for_created(&store, "1").await;
    write_status_file(&dir, "info {\n\tcreated=2\n\t}\n");
    wait_for_created(&store, "2").await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    assert!(store.refreshes_total() >= 2);
}

/// Polls the store until the worker has published `created=<want>`.
async fn wait_for_created(store: &SnapshotStore, want: &str) {
    let poll = async {
        loop {
            if let Some(latest) = store.latest().await
                && latest.info.fields.get("created").map(String::as_str) == Some(want)
            {
                return;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(tokio::time::Duration::from_secs(10), poll)
        .await
        .unwrap_or_else(|_| panic!("worker never published created={want}"));
}
