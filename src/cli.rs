//! Command-line interface module for probsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Logging setup
//! - Loading configuration and wiring the terminal prompt and git

use crate::classifier::CancelPolicy;
use crate::config::Config;
use crate::organizer::{Organizer, RunError, RunOptions, RunReport};
use crate::output::OutputFormatter;
use crate::prompt::TerminalPrompt;
use crate::publisher::GitCli;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// File solved practice problems by topic, index them and publish with git.
#[derive(Debug, Clone, Parser)]
#[command(name = "probsort", version, about)]
pub struct Cli {
    /// Project root holding the staging, topic and index paths.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to <root>/.probsortrc.toml, then ~/.config/probsort/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ask for topics and show what would happen without changing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip every git command.
    #[arg(long)]
    pub no_git: bool,

    /// Commit but do not push.
    #[arg(long, conflicts_with = "no_git")]
    pub no_push: bool,

    /// Cancelling a topic prompt stops the whole run instead of skipping the file.
    #[arg(long)]
    pub abort_on_cancel: bool,

    /// Enable debug logging (same as RUST_LOG=debug).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            publish: !self.no_git,
            push: !self.no_push,
        }
    }
}

/// Initializes `tracing` output on stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs the CLI application with parsed arguments.
///
/// This is the main entry point for CLI operations: it loads configuration,
/// applies command-line overrides and runs one organize pass against the
/// terminal prompt and the `git` binary.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use probsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["probsort", "--root", "/path/to/repo", "--no-push"]);
/// match run_cli(&cli) {
///     Ok(report) => println!("Moved {} files", report.moved()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunReport, RunError> {
    let config = load_config(cli)?;

    OutputFormatter::header("LeetCode Problem Organizer (By Topic)");
    if cli.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Analyzing contents of: {}",
            config.staging_path().display()
        ));
    }

    let prompt = TerminalPrompt::new();
    let git = GitCli::new(&config.root);
    Organizer::new(&config, &prompt, &git).run(cli.run_options())
}

/// Loads configuration for the CLI's root and applies flag overrides.
pub fn load_config(cli: &Cli) -> Result<Config, RunError> {
    let mut config = Config::load(&cli.root, cli.config.as_deref())?;
    if cli.abort_on_cancel {
        config.on_cancel = CancelPolicy::Abort;
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
