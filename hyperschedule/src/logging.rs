//! Log setup for the `hyperschedule` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. Logs go to stderr so stdout stays clean for JSON output.

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Timestamp format for log lines, e.g. `2024-09-03 01:15:00 PM`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &Config) -> &'static str {
    if config.verbose {
        "hyperschedule=debug,info"
    } else {
        "hyperschedule=info"
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()))
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
