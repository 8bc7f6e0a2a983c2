//! Logging and tracing setup.
//!
//! Human-readable logs always go to stderr (stdout carries command output and
//! the MCP protocol). When a log file or directory is configured, a second
//! JSONL layer writes through a non-blocking appender.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path.
pub const ENV_LOG_PATH: &str = "PRECIS_LOG_PATH";
/// Directory for daily-rotated log files.
pub const ENV_LOG_DIR: &str = "PRECIS_LOG_DIR";

const LOG_FILE_NAME: &str = "precis.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFile {
    /// A single file, never rotated.
    Exact(PathBuf),
    /// `precis.jsonl.<date>` files in a directory, rotated daily.
    Daily(PathBuf),
}

/// Resolved observability settings.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File sink, if any.
    pub log_file: Option<LogFile>,
}

impl ObservabilityConfig {
    /// Read the file sink from the environment, falling back to the
    /// configured `log_dir`.
    ///
    /// `PRECIS_LOG_PATH` wins over `PRECIS_LOG_DIR`, which wins over the
    /// config file.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(ENV_LOG_PATH).map(PathBuf::from);
        let log_dir = std::env::var_os(ENV_LOG_DIR).map(PathBuf::from);
        Self::resolve(log_path, log_dir, config_log_dir)
    }

    fn resolve(
        log_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path
            .filter(|p| !p.as_os_str().is_empty())
            .map(LogFile::Exact)
            .or_else(|| {
                log_dir
                    .or(config_log_dir)
                    .filter(|d| !d.as_os_str().is_empty())
                    .map(LogFile::Daily)
            });
        Self { log_file }
    }
}

/// Keeps the non-blocking file writer alive; drop it last.
#[must_use = "dropping the guard stops file logging"]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the log filter.
///
/// `RUST_LOG` wins. Otherwise `-q` means errors only, `-v` debug, `-vv`
/// trace, and the configured level applies when neither flag is given.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, config_level))
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, file_guard) = match &config.log_file {
        Some(target) => {
            let appender = match target {
                LogFile::Exact(path) => {
                    let (dir, name) = split_log_path(path)?;
                    std::fs::create_dir_all(dir)
                        .with_context(|| format!("failed to create {}", dir.display()))?;
                    tracing_appender::rolling::never(dir, name)
                }
                LogFile::Daily(dir) => {
                    std::fs::create_dir_all(dir)
                        .with_context(|| format!("failed to create {}", dir.display()))?;
                    tracing_appender::rolling::daily(dir, LOG_FILE_NAME)
                }
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(ObservabilityGuard { _file: file_guard })
}

fn split_log_path(path: &Path) -> anyhow::Result<(&Path, &std::ffi::OsStr)> {
    let name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_and_verbose_pick_levels() {
        assert_eq!(filter_directive(true, 2, "info"), "error");
        assert_eq!(filter_directive(false, 0, "warn"), "warn");
        assert_eq!(filter_directive(false, 1, "info"), "debug");
        assert_eq!(filter_directive(false, 3, "info"), "trace");
    }

    #[test]
    fn log_path_beats_log_dirs() {
        let cfg = ObservabilityConfig::resolve(
            Some("/tmp/x/precis.log".into()),
            Some("/tmp/env".into()),
            Some("/tmp/cfg".into()),
        );
        assert_eq!(
            cfg.log_file,
            Some(LogFile::Exact("/tmp/x/precis.log".into()))
        );
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(None, Some("/tmp/env".into()), Some("/tmp/cfg".into()));
        assert_eq!(cfg.log_file, Some(LogFile::Daily("/tmp/env".into())));

        let cfg = ObservabilityConfig::resolve(None, None, Some("/tmp/cfg".into()));
        assert_eq!(cfg.log_file, Some(LogFile::Daily("/tmp/cfg".into())));
    }

    #[test]
    fn nothing_configured_means_no_file() {
        let cfg = ObservabilityConfig::resolve(None, Some(PathBuf::new()), None);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn bare_file_name_logs_to_current_dir() {
        let (dir, name) = split_log_path(Path::new("precis.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "precis.log");
    }
}
