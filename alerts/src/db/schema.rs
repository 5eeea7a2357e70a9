use sqlx::AnyPool;

/// Idempotent startup check: creates the alert table and index if absent.
pub async fn migrate(pool: &AnyPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS pair_alerts (
  alert_id TEXT PRIMARY KEY,
  pair_id TEXT NOT NULL,
  direction TEXT NOT NULL CHECK (direction IN ('up','down')),
  alert TEXT NOT NULL,
  interval_secs BIGINT NOT NULL,
  threshold DOUBLE PRECISION NOT NULL,
  created_at TEXT NOT NULL
);
"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(r#"CREATE INDEX IF NOT EXISTS idx_pair_alerts_pair ON pair_alerts(pair_id);"#)
        .execute(pool)
        .await?;

    Ok(())
}
