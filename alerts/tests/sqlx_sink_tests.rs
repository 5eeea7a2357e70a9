use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};
use uuid::Uuid;

use alerts::db::schema;
use alerts::{Alert, AlertSink, Direction, SqlxAlertSink};

/// Isolated in-memory DB per test.
/// Unique name prevents test interference during parallel execution.
async fn setup_db() -> AnyPool {
    sqlx::any::install_default_drivers();

    let db_name = Uuid::new_v4().to_string();
    let conn = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    let pool = AnyPoolOptions::new()
        .max_connections(5)
        .connect(&conn)
        .await
        .expect("connect sqlite memory db");

    schema::migrate(&pool).await.expect("migrate");
    pool
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let pool = setup_db().await;

    schema::migrate(&pool).await.unwrap();
    schema::migrate(&pool).await.unwrap();

    let sink = SqlxAlertSink::new(pool);
    assert_eq!(sink.count().await.unwrap(), 0);
}

#[tokio::test]
async fn record_appends_alert_with_interval_and_threshold() {
    let pool = setup_db().await;
    let sink = SqlxAlertSink::new(pool.clone());

    let alert = Alert::new("BTC-USD", Direction::Up, 5, 0.01);
    sink.record(&alert).await.unwrap();

    let row = sqlx::query(
        "SELECT alert_id, pair_id, direction, alert, interval_secs, threshold, created_at FROM pair_alerts;",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.get::<String, _>("alert_id"), alert.alert_id.to_string());
    assert_eq!(row.get::<String, _>("pair_id"), "BTC-USD");
    assert_eq!(row.get::<String, _>("direction"), "up");
    assert_eq!(row.get::<String, _>("alert"), "BTC-USD price has gone up");
    assert_eq!(row.get::<i64, _>("interval_secs"), 5);
    assert_eq!(row.get::<f64, _>("threshold"), 0.01);
    assert_eq!(
        row.get::<String, _>("created_at"),
        alert.created_at.to_rfc3339()
    );
}

#[tokio::test]
async fn records_are_append_only() {
    let pool = setup_db().await;
    let sink = SqlxAlertSink::new(pool);

    sink.record(&Alert::new("BTC-USD", Direction::Up, 5, 0.01))
        .await
        .unwrap();
    sink.record(&Alert::new("BTC-USD", Direction::Down, 5, 0.01))
        .await
        .unwrap();
    sink.record(&Alert::new("EUR-USD", Direction::Down, 5, 0.01))
        .await
        .unwrap();

    assert_eq!(sink.count().await.unwrap(), 3);
}

#[tokio::test]
async fn duplicate_alert_id_is_rejected() {
    let pool = setup_db().await;
    let sink = SqlxAlertSink::new(pool);

    let alert = Alert::new("BTC-USD", Direction::Up, 5, 0.01);
    sink.record(&alert).await.unwrap();

    assert!(sink.record(&alert).await.is_err());
    assert_eq!(sink.count().await.unwrap(), 1);
}

#[tokio::test]
async fn missing_table_surfaces_as_persistence_error() {
    sqlx::any::install_default_drivers();
    let conn = format!(
        "sqlite:file:{}?mode=memory&cache=shared",
        Uuid::new_v4()
    );
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect(&conn)
        .await
        .unwrap();

    let sink = SqlxAlertSink::new(pool);
    let err = sink
        .record(&Alert::new("BTC-USD", Direction::Up, 5, 0.01))
        .await
        .unwrap_err();

    assert!(matches!(err, alerts::PersistenceError::Database(_)));
}
