//! The polling scheduler.
//!
//! Every `interval` it starts one tick. A tick fans out over all configured
//! pairs; each pair independently:
//!   1. fetches a quote (bounded by `fetch_timeout`),
//!   2. validates it,
//!   3. swaps it into the registry, taking the previous sample as baseline,
//!   4. runs the detector and, on a signal, logs and enqueues an alert.
//!
//! Ticks are spawned on the timer, not chained to the previous tick finishing,
//! so a slow tick may overlap the next one. The registry swap is atomic per
//! pair, which keeps overlapping ticks consistent.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout};
use tracing::{Instrument, Span, debug, info, warn};

use alerts::{Alert, AlertWriter};
use common::logger::{TraceId, pair_span, tick_span, warn_if_slow};
use market::{FetchError, Pair, QuoteFetcher};

use crate::config::MonitorConfig;
use crate::detector::{detect, relative_change};
use crate::errors::SchedulerError;
use crate::metrics::Counters;
use crate::registry::PairRegistry;
use crate::types::{PairOutcome, SchedulerStatus, TickReport};

const SLOW_FETCH: Duration = Duration::from_secs(2);

pub struct PollingScheduler {
    cfg: MonitorConfig,
    fetcher: Arc<dyn QuoteFetcher>,
    registry: PairRegistry,
    alerts: AlertWriter,
    status: Mutex<SchedulerStatus>,
    next_tick: AtomicU64,
    counters: Counters,
}

impl PollingScheduler {
    pub fn new(
        cfg: MonitorConfig,
        fetcher: Arc<dyn QuoteFetcher>,
        alerts: AlertWriter,
    ) -> Arc<Self> {
        let registry = PairRegistry::new(cfg.pairs.iter().cloned());

        Arc::new(Self {
            cfg,
            fetcher,
            registry,
            alerts,
            status: Mutex::new(SchedulerStatus::Idle),
            next_tick: AtomicU64::new(0),
            counters: Counters::default(),
        })
    }

    pub fn status(&self) -> SchedulerStatus {
        *self.status.lock()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Moves `Idle -> Running` and spawns the timer task. Tick 0 fires
    /// immediately; later ticks every `interval`. The task runs until aborted
    /// or the runtime shuts down.
    pub fn start(self: &Arc<Self>) -> Result<JoinHandle<()>, SchedulerError> {
        {
            let mut status = self.status.lock();
            if *status == SchedulerStatus::Running {
                return Err(SchedulerError::AlreadyRunning);
            }
            *status = SchedulerStatus::Running;
        }

        info!(
            interval_secs = self.cfg.interval_secs,
            threshold = self.cfg.threshold,
            pairs = %self.cfg.pair_list(),
            "polling scheduler started"
        );

        let this = Arc::clone(self);
        Ok(tokio::spawn(this.drive()))
    }

    async fn drive(self: Arc<Self>) {
        let mut ticker = interval(self.cfg.interval().max(Duration::from_secs(1)));

        loop {
            ticker.tick().await;

            let this = Arc::clone(&self);
            tokio::spawn(async move {
                this.run_tick().await;
            });
        }
    }

    /// Runs one full fetch-detect-update pass over every configured pair.
    pub async fn run_tick(&self) -> TickReport {
        let tick = self.next_tick.fetch_add(1, Ordering::Relaxed);
        let trace_id = TraceId::new();

        self.tick_inner(tick)
            .instrument(tick_span(tick, &trace_id))
            .await
    }

    async fn tick_inner(&self, tick: u64) -> TickReport {
        Counters::bump(&self.counters.ticks);

        // Completions are handled as they arrive; no pair waits on another.
        let mut pending: FuturesUnordered<_> = self
            .cfg
            .pairs
            .iter()
            .map(|pair| {
                async move { (pair.clone(), self.process_pair(pair).await) }
                    .instrument(pair_span(&pair.id()))
            })
            .collect();

        let mut report = TickReport::new(tick);
        while let Some((pair, outcome)) = pending.next().await {
            report.push(pair, outcome);
        }

        let signals = report.signals();
        Span::current().record("signals", signals);

        if signals == 0 {
            Counters::bump(&self.counters.quiet_ticks);
            info!("No change in pair data.");
        } else {
            debug!(signals, failures = report.failures(), "tick complete");
        }

        report
    }

    async fn process_pair(&self, pair: &Pair) -> PairOutcome {
        let fetched = warn_if_slow(
            "quote_fetch",
            SLOW_FETCH,
            timeout(self.cfg.fetch_timeout, self.fetcher.fetch(pair)),
        )
        .await
        .unwrap_or_else(|_| {
            Err(FetchError::Timeout(
                self.cfg.fetch_timeout.as_millis() as u64,
            ))
        });

        let sample = match fetched {
            Ok(sample) => sample,
            Err(e) => {
                Counters::bump(&self.counters.fetch_failures);
                warn!(error = %e, "quote fetch failed; baseline kept");
                return PairOutcome::FetchFailed(e.to_string());
            }
        };

        if let Err(e) = sample.validate() {
            Counters::bump(&self.counters.invalid_samples);
            warn!(error = %e, ask = sample.ask, bid = sample.bid, "invalid quote; detection skipped");
            return PairOutcome::InvalidSample(e.to_string());
        }

        let new_ask = sample.ask;
        let Some(baseline) = self.registry.replace(pair, sample) else {
            Counters::bump(&self.counters.seeded);
            debug!(ask = new_ask, "baseline established");
            return PairOutcome::Seeded;
        };

        let change_pct = relative_change(baseline.ask, new_ask).unwrap_or_default();
        let signal = detect(Some(baseline.ask), new_ask, self.cfg.threshold);

        let Some(direction) = signal.direction() else {
            debug!(old_ask = baseline.ask, new_ask, change_pct, "within threshold");
            return PairOutcome::Steady { change_pct };
        };

        let alert = Alert::new(
            pair.id(),
            direction,
            self.cfg.interval_secs,
            self.cfg.threshold,
        );

        Counters::bump(&self.counters.alerts);
        info!(
            direction = %direction,
            old_ask = baseline.ask,
            new_ask,
            change_pct,
            alert_id = %alert.alert_id,
            "{}",
            alert.message
        );

        self.alerts.submit(alert);

        PairOutcome::Alerted {
            direction,
            change_pct,
        }
    }
}
