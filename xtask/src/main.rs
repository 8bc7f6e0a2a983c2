//! Development tasks: `cargo xtask <task>`.
//!
//! Generates man pages and shell completions from the `precis` clap command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "precis development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages into DIR (default: target/man)
    Man {
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completions into DIR (default: target/completions)
    Completions {
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Shells to generate for (default: all)
        #[arg(long, value_enum)]
        shell: Vec<Shell>,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => gen_man(&out),
        Task::Completions { out, shell } => {
            let shells = if shell.is_empty() {
                Shell::value_variants().to_vec()
            } else {
                shell
            };
            gen_completions(&out, &shells)
        }
    }
}

fn gen_man(out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    let cmd = precis::command();
    clap_mangen::generate_to(cmd, out)
        .with_context(|| format!("failed to write man pages to {}", out.display()))?;
    println!("man pages written to {}", out.display());
    Ok(())
}

fn gen_completions(out: &Path, shells: &[Shell]) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    let mut cmd = precis::command();
    for &shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "precis", out)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
