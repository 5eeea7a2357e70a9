//! Fire-and-forget alert persistence.
//!
//! The scheduler hands alerts to a bounded queue and never awaits the write.
//! A single writer task drains the queue into the configured [`AlertSink`].
//! Sink failures are logged and counted; a full queue drops the record.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::model::Alert;
use crate::sink::AlertSink;

/// Counters for the persistence path.
#[derive(Debug, Default)]
pub struct WriterStats {
    written: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

impl WriterStats {
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Producer handle for the alert queue. Cheap to clone.
#[derive(Clone)]
pub struct AlertWriter {
    tx: Sender<Alert>,
    stats: Arc<WriterStats>,
}

impl AlertWriter {
    /// Starts the writer task. The task ends once every `AlertWriter` clone is
    /// dropped and the queue is drained.
    pub fn spawn(sink: Arc<dyn AlertSink>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let stats = Arc::new(WriterStats::default());

        let handle = tokio::spawn(run_writer(sink, rx, Arc::clone(&stats)));

        (Self { tx, stats }, handle)
    }

    /// Enqueues an alert without waiting. Returns `false` if it was dropped.
    pub fn submit(&self, alert: Alert) -> bool {
        match self.tx.try_send(alert) {
            Ok(()) => true,
            Err(TrySendError::Full(alert)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    alert_id = %alert.alert_id,
                    pair = %alert.pair_id,
                    "alert queue full; record not persisted"
                );
                false
            }
            Err(TrySendError::Closed(alert)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    alert_id = %alert.alert_id,
                    pair = %alert.pair_id,
                    "alert writer stopped; record not persisted"
                );
                false
            }
        }
    }

    pub fn stats(&self) -> Arc<WriterStats> {
        Arc::clone(&self.stats)
    }
}

async fn run_writer(sink: Arc<dyn AlertSink>, mut rx: Receiver<Alert>, stats: Arc<WriterStats>) {
    debug!("alert writer started");

    while let Some(alert) = rx.recv().await {
        match sink.record(&alert).await {
            Ok(()) => {
                stats.written.fetch_add(1, Ordering::Relaxed);
                debug!(alert_id = %alert.alert_id, "alert persisted");
            }
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    error = %e,
                    alert_id = %alert.alert_id,
                    pair = %alert.pair_id,
                    "failed to persist alert"
                );
            }
        }
    }

    info!(
        written = stats.written(),
        failed = stats.failed(),
        dropped = stats.dropped(),
        "alert writer stopped"
    );
}
