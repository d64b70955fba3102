//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library crates only emit events; this module installs the subscriber for
//! the `hydro-dash` binary.
//!
//! # Log Levels
//!
//! - `error`: fatal normalization failures
//! - `warn`: advisories such as coerced values and alias collisions (default)
//! - `info`: pipeline stages, encoding fallbacks, backfills, exports
//! - `debug`: per-column alias resolution and time indexing
//! - `trace`: everything else
//!
//! `RUST_LOG` is honored unless a level was set on the command line.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Workspace crates whose events are shown at the configured level.
const WORKSPACE_TARGETS: &[&str] = &[
    "hydro_cli",
    "hydro_dash",
    "hydro_ingest",
    "hydro_map",
    "hydro_model",
    "hydro_output",
    "hydro_transform",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the configured level when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs go to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing, one object per line.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            format_layer(config, Mutex::new(file))
        }
        None => format_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(layer)
        .init();
    Ok(())
}

/// The event formatting layer for `config`, writing to `writer`.
///
/// JSON output never carries ANSI codes and also reports span closings.
pub fn format_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, true) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Json, false) => layer
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .without_time()
            .boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Filter directives for the configured level; other crates stay at warn.
pub fn default_directives(level: LevelFilter) -> String {
    if level == LevelFilter::OFF {
        return "off".to_string();
    }
    let level = level.to_string().to_lowercase();
    let base = if level == "error" { "error" } else { "warn" };
    let targets: Vec<String> = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    format!("{base},{}", targets.join(","))
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(format: LogFormat, with_timestamps: bool) -> String {
        let config = LogConfig {
            format,
            with_timestamps,
            with_ansi: false,
            ..LogConfig::default()
        };
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber =
            tracing_subscriber::registry().with(format_layer(&config, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(count = 3, "coerced values");
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn timestamps_are_opt_in() {
        let plain = capture(LogFormat::Compact, false);
        assert!(plain.trim_start().starts_with("WARN"), "{plain}");
        assert!(plain.contains("coerced values"));

        let stamped = capture(LogFormat::Compact, true);
        assert!(!stamped.trim_start().starts_with("WARN"), "{stamped}");
        assert!(stamped.contains("WARN"));
    }

    #[test]
    fn json_lines_carry_level_and_fields() {
        let line = capture(LogFormat::Json, false);
        assert!(line.contains("\"level\":\"WARN\""), "{line}");
        assert!(line.contains("\"count\":3"), "{line}");
        assert!(!line.contains("\"timestamp\""), "{line}");

        assert!(capture(LogFormat::Json, true).contains("\"timestamp\""));
    }

    #[test]
    fn directives_raise_only_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("hydro_transform=debug"));
        assert!(directives.contains("hydro_ingest=debug"));
    }

    #[test]
    fn error_level_keeps_dependencies_quiet() {
        let directives = default_directives(LevelFilter::ERROR);
        assert!(directives.starts_with("error,"));
        assert!(directives.contains("hydro_map=error"));
    }

    #[test]
    fn off_disables_everything() {
        assert_eq!(default_directives(LevelFilter::OFF), "off");
    }
}
