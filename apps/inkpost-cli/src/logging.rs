use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::config::LoggingConfig;

/// Pick the filter: `-v` counts first, then `RUST_LOG`, then the config.
fn filter_for(config: &LoggingConfig, verbose: u8) -> EnvFilter {
    let noisy = ",hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";
    match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new(format!("info{noisy}")),
        2 => EnvFilter::new(format!("debug{noisy}")),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let filter = filter_for(config, verbose);
    let layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed()
    };
    tracing_subscriber::registry().with(layer).init();
}
