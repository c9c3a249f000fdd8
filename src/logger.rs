//! Diagnostics go to stderr; stdout carries nothing but SQL.

use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{Format, Writer};

struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(writer, "{}", now.format("%H:%M:%S%.3f"))
    }
}

/// Install the global subscriber.
///
/// `level` applies unless `RUST_LOG` sets a level without a target, which then
/// replaces it. Targeted `RUST_LOG` directives refine `level`.
pub fn setup_logger(level: LevelFilter) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(level, directives.as_deref());
    let format = Format::default()
        .with_timer(LocalTimer)
        .with_level(true)
        .with_target(false);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(format)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("Logger has already been set up, continuing...");
    }
}

fn env_filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}
