//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use precis_core::DEFAULT_SCALE_FACTOR;
use precis_core::config::{Config, ConfigSources, DEFAULT_HTTP_ADDR};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

/// Effective settings, with defaults filled in.
#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    scale_factor: f64,
    match_mode: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extra_stop_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_words_file: Option<String>,
    /// `None` when the limit is disabled.
    max_input_bytes: Option<usize>,
    http_addr: String,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            scale_factor: config.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR),
            match_mode: config.match_mode.unwrap_or_default().to_string(),
            extra_stop_words: config.extra_stop_words.clone().unwrap_or_default(),
            stop_words_file: config.stop_words_file.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            http_addr: config
                .http_addr
                .clone()
                .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Summarizer".bold().underline());
    println!("{}: {}", "Scale factor".dimmed(), cfg.scale_factor);
    println!("{}: {}", "Match mode".dimmed(), cfg.match_mode);
    if !cfg.extra_stop_words.is_empty() {
        println!(
            "{}: {}",
            "Extra stop words".dimmed(),
            cfg.extra_stop_words.join(", ")
        );
    }
    if let Some(ref path) = cfg.stop_words_file {
        println!("{}: {}", "Stop words file".dimmed(), path);
    }
    match cfg.max_input_bytes {
        Some(max) => println!("{}: {} bytes", "Input limit".dimmed(), max),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }
    println!("{}: {}", "HTTP address".dimmed(), cfg.http_addr);

    Ok(())
}
