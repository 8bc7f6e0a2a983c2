//! Summarize command: extract the highest-scoring sentences of a text.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use precis_core::config::Config;
use precis_core::markdown;
use precis_core::{MatchMode, Outcome, Summarizer, Summary};

use super::{read_input_file, read_stdin};

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug, Default)]
pub struct SummarizeArgs {
    /// File to summarize (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Threshold multiplier applied to the mean sentence score.
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f64>,

    /// How frequent words are matched against sentences.
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,

    /// Strip markdown before summarizing (default for .md files).
    #[arg(long, conflicts_with = "no_markdown")]
    pub markdown: bool,

    /// Treat the input as plain text even for .md files.
    #[arg(long)]
    pub no_markdown: bool,
}

impl SummarizeArgs {
    fn input_path(&self) -> Option<&Utf8PathBuf> {
        self.file.as_ref().filter(|p| p.as_str() != "-")
    }

    fn strip_markdown(&self) -> bool {
        if self.markdown {
            return true;
        }
        if self.no_markdown {
            return false;
        }
        self.input_path()
            .is_some_and(|p| markdown::is_markdown_path(p))
    }
}

/// Summarize a file or stdin and print the result.
#[instrument(name = "cmd_summarize", skip_all, fields(file = ?args.file))]
pub fn cmd_summarize(
    args: SummarizeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(scale = ?args.scale, match_mode = ?args.match_mode, "executing summarize command");

    let content = match args.input_path() {
        Some(path) => read_input_file(path, max_input_bytes)?,
        None => read_stdin(max_input_bytes)?,
    };
    let text = if args.strip_markdown() {
        markdown::strip_to_prose(&content)
    } else {
        content
    };

    let summary = summarize_text(&text, &args, config)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn summarize_text(text: &str, args: &SummarizeArgs, config: &Config) -> anyhow::Result<Summary> {
    let mut summarizer = Summarizer::from_config(config).context("failed to set up summarizer")?;
    if let Some(scale) = args.scale {
        summarizer = summarizer
            .with_scale_factor(scale)
            .context("invalid --scale")?;
    }
    if let Some(mode) = args.match_mode {
        summarizer = summarizer.with_match_mode(mode);
    }
    Ok(summarizer.summarize(text))
}

fn print_summary(summary: &Summary) {
    match summary.outcome {
        Outcome::EmptyInput => {
            eprintln!("{} input contains no sentences", "warning:".yellow().bold());
        }
        Outcome::NoMatches => {
            eprintln!(
                "{} none of {} sentences contain a content word",
                "warning:".yellow().bold(),
                summary.total_sentences
            );
        }
        Outcome::Summarized if summary.is_empty() => {
            eprintln!(
                "{} no sentence reached the threshold ({:.3})",
                "warning:".yellow().bold(),
                summary.threshold.unwrap_or_default()
            );
        }
        Outcome::Summarized => println!("{}", summary.text),
    }
}
