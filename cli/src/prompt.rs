//! Interactive collection of monitoring parameters.
//!
//! Generic over the reader and writer so the dialogue can be driven from
//! tests with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use market::Pair;
use scheduler::config::{
    DEFAULT_INTERVAL_SECS, DEFAULT_THRESHOLD, parse_interval, parse_threshold,
};
use scheduler::{MonitorConfig, MonitorConfigBuilder};

const STOP_WORDS: [&str; 2] = ["done", "exit"];

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the full dialogue and prints the effective configuration.
    pub fn collect(&mut self, fetch_timeout: Duration) -> io::Result<MonitorConfig> {
        let mut builder = MonitorConfig::builder().fetch_timeout(fetch_timeout);

        builder = self.ask_interval(builder)?;
        builder = self.ask_threshold(builder)?;
        builder = self.ask_pairs(builder)?;

        let cfg = builder.build();
        self.summary(&cfg)?;
        Ok(cfg)
    }

    fn ask_interval(&mut self, builder: MonitorConfigBuilder) -> io::Result<MonitorConfigBuilder> {
        let answer = self.ask(&format!(
            "Fetch interval in seconds [{DEFAULT_INTERVAL_SECS}]: "
        ))?;

        Ok(match answer.as_deref().map(str::trim) {
            None | Some("") => builder,
            Some(raw) => match parse_interval(raw) {
                Ok(secs) => builder.interval_secs(secs),
                Err(e) => {
                    writeln!(self.output, "{e}; using {DEFAULT_INTERVAL_SECS} seconds")?;
                    builder
                }
            },
        })
    }

    fn ask_threshold(&mut self, builder: MonitorConfigBuilder) -> io::Result<MonitorConfigBuilder> {
        let answer = self.ask(&format!(
            "Oscillation threshold as a fraction, 0.01 = 1% [{DEFAULT_THRESHOLD}]: "
        ))?;

        Ok(match answer.as_deref().map(str::trim) {
            None | Some("") => builder,
            Some(raw) => match parse_threshold(raw) {
                Ok(t) => builder.threshold(t),
                Err(e) => {
                    writeln!(self.output, "{e}; using {DEFAULT_THRESHOLD}")?;
                    builder
                }
            },
        })
    }

    fn ask_pairs(&mut self, mut builder: MonitorConfigBuilder) -> io::Result<MonitorConfigBuilder> {
        writeln!(
            self.output,
            "Enter pairs one per line (e.g. BTC-USD or eurusd). Empty line, 'done' or 'exit' to finish."
        )?;

        loop {
            let Some(line) = self.ask("Pair: ")? else {
                break;
            };
            let line = line.trim();

            if line.is_empty() || STOP_WORDS.contains(&line.to_ascii_lowercase().as_str()) {
                break;
            }

            match Pair::parse(line) {
                Ok(pair) => {
                    writeln!(self.output, "Added {pair}")?;
                    builder = builder.pair(pair);
                }
                Err(e) => writeln!(self.output, "Skipped: {e}")?,
            }
        }

        Ok(builder)
    }

    fn summary(&mut self, cfg: &MonitorConfig) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Interval: {} seconds", cfg.interval_secs)?;
        writeln!(
            self.output,
            "Percentage: {}% (threshold {})",
            cfg.threshold * 100.0,
            cfg.threshold
        )?;
        writeln!(self.output, "Pairs: {}", cfg.pair_list())?;
        self.output.flush()
    }

    /// `None` once the input is exhausted.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (MonitorConfig, String) {
        let mut out = Vec::new();
        let cfg = Prompter::new(input.as_bytes(), &mut out)
            .collect(Duration::from_secs(5))
            .unwrap();
        (cfg, String::from_utf8(out).unwrap())
    }

    #[test]
    fn collects_all_answers() {
        let (cfg, out) = run("10\n0.02\neurusd\nBTC-USD\ndone\n");

        assert_eq!(cfg.interval_secs, 10);
        assert_eq!(cfg.threshold, 0.02);
        assert_eq!(cfg.pair_list(), "EUR-USD BTC-USD");
        assert!(out.contains("Added EUR-USD"));
        assert!(out.contains("Interval: 10 seconds"));
        assert!(out.contains("Pairs: EUR-USD BTC-USD"));
    }

    #[test]
    fn empty_answers_take_defaults() {
        let (cfg, out) = run("\n\n\n");

        assert_eq!(cfg.interval_secs, 5);
        assert_eq!(cfg.threshold, 0.01);
        assert_eq!(cfg.pair_list(), "BTC-USD");
        assert!(out.contains("Percentage: 1% (threshold 0.01)"));
    }

    #[test]
    fn invalid_numbers_default_with_notice() {
        let (cfg, out) = run("often\n-1\nexit\n");

        assert_eq!(cfg.interval_secs, 5);
        assert_eq!(cfg.threshold, 0.01);
        assert!(out.contains("using 5 seconds"));
        assert!(out.contains("using 0.01"));
    }

    #[test]
    fn invalid_pairs_are_reported_and_skipped() {
        let (cfg, out) = run("5\n0.01\nBTC/USD\nxrp-eur\nEXIT\nETH-USD\n");

        assert_eq!(cfg.pair_list(), "XRP-EUR");
        assert!(out.contains("Skipped:"));
        assert!(!out.contains("ETH-USD"));
    }

    #[test]
    fn end_of_input_finishes_the_dialogue() {
        let (cfg, _) = run("3\n0.1\neth-usd");

        assert_eq!(cfg.interval_secs, 3);
        assert_eq!(cfg.threshold, 0.1);
        assert_eq!(cfg.pair_list(), "ETH-USD");
    }
}
