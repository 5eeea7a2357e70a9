use clap::Parser;

use market::Pair;
use scheduler::MonitorConfig;

#[derive(Debug, Parser)]
#[clap(name = "pairwatch", version)]
#[clap(about = "Polls ticker quotes and alerts when a pair oscillates past a threshold")]
pub struct Cli {
    /// Skip the interactive questions and use the flags below
    #[clap(long)]
    pub no_prompt: bool,

    /// Seconds between polls
    #[clap(long)]
    pub interval: Option<u64>,

    /// Oscillation threshold as a fraction (0.01 = 1%)
    #[clap(long)]
    pub threshold: Option<f64>,

    /// Pairs to watch, e.g. BTC-USD or eurusd (repeat or comma-separate)
    #[clap(long = "pair", value_delimiter = ',', value_parser = parse_pair)]
    pub pairs: Vec<Pair>,
}

fn parse_pair(raw: &str) -> Result<Pair, String> {
    Pair::parse(raw).map_err(|e| e.to_string())
}

impl Cli {
    /// Monitoring parameters from flags alone; unset values take defaults.
    pub fn monitor_config(&self, fetch_timeout: std::time::Duration) -> MonitorConfig {
        let mut b = MonitorConfig::builder()
            .pairs(self.pairs.iter().cloned())
            .fetch_timeout(fetch_timeout);

        if let Some(secs) = self.interval {
            b = b.interval_secs(secs);
        }
        if let Some(t) = self.threshold {
            b = b.threshold(t);
        }

        b.build()
    }
}
