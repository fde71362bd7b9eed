/*!
 * Logging and tracing initialization
 *
 * Human runs log to stdout next to the tables. With `--json` the plan owns
 * stdout, so log lines go to stderr instead. `--log FILE` sends JSON records
 * to the file in either mode.
 */

use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::BalanceConfig;
use crate::error::{FizzzError, Result};

/// Where log records end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl LogSink {
    /// Choose the sink for a run
    pub fn for_config(config: &BalanceConfig) -> Self {
        match (&config.log_file, config.json_output) {
            (Some(path), _) => LogSink::File(path.clone()),
            (None, true) => LogSink::Stderr,
            (None, false) => LogSink::Stdout,
        }
    }
}

/// Pick the effective level: the debug flag wins over the configured level
pub fn effective_level(config: &BalanceConfig) -> Level {
    if config.verbose {
        Level::DEBUG
    } else {
        config.log_level.to_tracing_level()
    }
}

fn build_filter(level: Level) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("fizzz={}", level)))
        .map_err(|e| FizzzError::Config(format!("Failed to create log filter: {}", e)))
}

/// Install the global subscriber for this run
pub fn init_logging(config: &BalanceConfig) -> Result<()> {
    let filter = build_filter(effective_level(config))?;

    match LogSink::for_config(config) {
        LogSink::File(path) => init_json_file(&path, filter),
        LogSink::Stdout => {
            init_console(BoxMakeWriter::new(std::io::stdout), filter);
            Ok(())
        }
        LogSink::Stderr => {
            init_console(BoxMakeWriter::new(std::io::stderr), filter);
            Ok(())
        }
    }
}

fn init_console(writer: BoxMakeWriter, filter: EnvFilter) {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn init_json_file(path: &Path, filter: EnvFilter) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        FizzzError::Config(format!(
            "Failed to create log file {}: {}",
            path.display(),
            e
        ))
    })?;

    let layer = fmt::layer()
        .with_writer(file)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}

/// Route logs through the test harness so they only show for failing tests
#[cfg(test)]
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fizzz=debug"));
        let layer = fmt::layer().with_test_writer().with_target(false).compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_verbose_overrides_log_level() {
        let config = BalanceConfig {
            log_level: LogLevel::Error,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(effective_level(&config), Level::DEBUG);
    }

    #[test]
    fn test_configured_level_used_without_verbose() {
        let config = BalanceConfig {
            log_level: LogLevel::Warn,
            verbose: false,
            ..Default::default()
        };
        assert_eq!(effective_level(&config), Level::WARN);
    }

    #[test]
    fn test_human_output_logs_to_stdout() {
        assert_eq!(
            LogSink::for_config(&BalanceConfig::default()),
            LogSink::Stdout
        );
    }

    #[test]
    fn test_json_output_keeps_logs_off_stdout() {
        let config = BalanceConfig {
            json_output: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(LogSink::for_config(&config), LogSink::Stderr);
    }

    #[test]
    fn test_log_file_wins_over_console() {
        for json_output in [false, true] {
            let config = BalanceConfig {
                json_output,
                log_file: Some(PathBuf::from("run.log")),
                ..Default::default()
            };
            assert_eq!(
                LogSink::for_config(&config),
                LogSink::File(PathBuf::from("run.log"))
            );
        }
    }

    #[test]
    fn test_unwritable_log_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BalanceConfig {
            log_file: Some(dir.path().join("missing").join("fizzz.log")),
            ..Default::default()
        };

        // File creation fails before any subscriber is installed
        assert!(matches!(init_logging(&config), Err(FizzzError::Config(_))));
    }
}
