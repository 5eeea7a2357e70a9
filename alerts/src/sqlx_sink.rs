use async_trait::async_trait;
use sqlx::{AnyPool, Row};
use tracing::instrument;

use crate::errors::PersistenceError;
use crate::model::Alert;
use crate::sink::AlertSink;

/// SQLx-backed alert sink. Insert-only; rows are never updated or deleted.
#[derive(Clone)]
pub struct SqlxAlertSink {
    pool: AnyPool,
}

impl SqlxAlertSink {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Number of alerts stored so far.
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM pair_alerts;")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get::<i64, _>("n")?)
    }
}

#[async_trait]
impl AlertSink for SqlxAlertSink {
    #[instrument(skip(self, alert), fields(alert_id = %alert.alert_id, pair = %alert.pair_id), level = "debug")]
    async fn record(&self, alert: &Alert) -> Result<(), PersistenceError> {
        let interval_secs =
            i64::try_from(alert.interval_secs).map_err(|_| PersistenceError::OutOfRange {
                column: "interval_secs",
                value: alert.interval_secs.to_string(),
            })?;

        sqlx::query(
            r#"
INSERT INTO pair_alerts (alert_id, pair_id, direction, alert, interval_secs, threshold, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7);
"#,
        )
        .bind(alert.alert_id.to_string())
        .bind(alert.pair_id.clone())
        .bind(alert.direction.as_str())
        .bind(alert.message.clone())
        .bind(interval_secs)
        .bind(alert.threshold)
        .bind(alert.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
