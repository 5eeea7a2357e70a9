mod cli;
mod config;
mod prompt;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use alerts::db::Db;
use alerts::{AlertSink, AlertWriter, NoopSink, SqlxAlertSink};
use common::logger::init_logger;
use market::uphold::UpholdClient;
use scheduler::PollingScheduler;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::prompt::Prompter;

const DB_MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = AppConfig::from_env();

    init_logger("pairwatch", app.json_logs);
    app.log_rejected();

    let monitor = if cli.no_prompt {
        cli.monitor_config(app.fetch_timeout)
    } else {
        Prompter::new(io::stdin().lock(), io::stdout())
            .collect(app.fetch_timeout)
            .context("reading monitor configuration")?
    };

    let sink = init_sink(&app).await;
    let (writer, writer_task) = AlertWriter::spawn(sink, app.alert_queue_capacity);
    let writer_stats = writer.stats();

    let client = UpholdClient::new(app.ticker_base_url.clone(), app.fetch_timeout)
        .context("building ticker client")?;

    let scheduler = PollingScheduler::new(monitor, Arc::new(client), writer);
    let timer = scheduler.start()?;

    tokio::signal::ctrl_c()
        .await
        .context("listening for ctrl-c")?;
    info!("shutdown requested");

    timer.abort();
    let counters = scheduler.counters().snapshot();
    drop(scheduler);

    // In-flight ticks still hold writer handles until their fetches settle.
    let grace = app.fetch_timeout + Duration::from_secs(1);
    if tokio::time::timeout(grace, writer_task).await.is_err() {
        warn!(grace_ms = grace.as_millis() as u64, "alert writer did not drain in time");
    }

    info!(
        ticks = counters.ticks,
        alerts = counters.alerts,
        fetch_failures = counters.fetch_failures,
        persisted = writer_stats.written(),
        persist_failures = writer_stats.failed(),
        dropped = writer_stats.dropped(),
        "pairwatch stopped"
    );

    Ok(())
}

async fn init_sink(app: &AppConfig) -> Arc<dyn AlertSink> {
    let Some(url) = app.database_url.as_deref() else {
        info!("DATABASE_URL not set; alerts will not be persisted");
        return Arc::new(NoopSink);
    };

    match connect_store(url).await {
        Ok(sink) => sink,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "alert store unavailable; alerts will not be persisted");
            Arc::new(NoopSink)
        }
    }
}

async fn connect_store(url: &str) -> anyhow::Result<Arc<dyn AlertSink>> {
    let db = Db::connect(url, DB_MAX_CONNECTIONS)
        .await
        .context("connecting to alert store")?;
    db.migrate().await.context("creating alert schema")?;

    let sink = SqlxAlertSink::new(db.pool.clone());
    let stored = sink.count().await.context("counting stored alerts")?;
    info!(stored, "alert store ready");

    Ok(Arc::new(sink))
}
