//! Logging and tracing configuration
//!
//! Logs go to stderr so that the report on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Human,
    /// One JSON object per line
    Json,
}

/// Initialize tracing for the CLI
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("test_it=info,warn"));

    let human = (format == LogFormat::Human).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(human)
        .with(json)
        .init();
}
