use async_trait::async_trait;

use crate::errors::PersistenceError;
use crate::model::Alert;

/// Append-only destination for alerts. Callers treat failures as best-effort:
/// they are logged, never propagated into the polling loop.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn record(&self, alert: &Alert) -> Result<(), PersistenceError>;
}

/// Sink used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl AlertSink for NoopSink {
    async fn record(&self, alert: &Alert) -> Result<(), PersistenceError> {
        tracing::trace!(alert_id = %alert.alert_id, "persistence disabled; alert not stored");
        Ok(())
    }
}
