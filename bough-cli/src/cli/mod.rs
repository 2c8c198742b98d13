//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the bough tool. Every
//! subcommand maps onto one query engine operation and prints either text or
//! JSON.

mod diff;
mod hash;
mod list;
mod report;
mod switch;
mod updated;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use bough_core::{Branch, ColorMode, ConfigDirs, GitRunner, Settings};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

/// Top-level CLI command for the bough tool
#[derive(Parser)]
#[command(name = "bough")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Compare the branches of a git repository")]
#[command(
  long_about = "Bough reports, for every branch of a repository, how far it is ahead of or\n\
        behind a reference branch, its latest commit and the common ancestor with the\n\
        reference. All data comes from git porcelain commands."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Path to the repository's working directory
  #[arg(long, short = 'r', value_name = "PATH", global = true, default_value = ".")]
  pub repo: PathBuf,

  /// Git executable to invoke (overrides settings and BOUGH_GIT)
  #[arg(long, value_name = "PATH", global = true)]
  pub git: Option<PathBuf>,

  /// Settings file to use instead of the default location
  #[arg(long, value_name = "FILE", global = true)]
  pub config: Option<PathBuf>,

  /// Print machine-readable JSON instead of text
  #[arg(long, global = true)]
  pub json: bool,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the bough tool
#[derive(Subcommand)]
pub enum Commands {
  /// List branches
  #[command(long_about = "List local, remote, or all branches.\n\n\
            The current branch is marked with '*'. Branches can be sorted by name or by\n\
            the date of their latest commit (newest first). Arguments after '--' are\n\
            passed to 'git branch', e.g. 'bough list -- --merged main'.")]
  #[command(alias = "ls")]
  List(list::ListArgs),

  /// Show the latest commit of a branch
  #[command(long_about = "Print the full hash of a branch's latest commit, or of HEAD when no branch\n\
            is given. Prints 'None' when the repository has no commits yet.")]
  Latest(hash::LatestArgs),

  /// Show the common ancestor of two branches
  #[command(long_about = "Print the merge base of two branches. The second branch defaults to the\n\
            reference branch. Prints 'None' when the histories are unrelated.")]
  #[command(name = "merge-base")]
  #[command(alias = "mb")]
  MergeBase(hash::MergeBaseArgs),

  /// Show commits exclusive to each of two branches
  #[command(long_about = "Compare two branches. 'ahead' counts commits on the first branch that the\n\
            second lacks, 'behind' counts commits on the second branch that the first lacks.\n\
            The second branch defaults to the reference branch.")]
  Diff(diff::DiffArgs),

  /// Show when a branch was last updated
  #[command(long_about = "Print the date of the latest commit on a branch (or HEAD) in one of git's\n\
            date formats.")]
  Updated(updated::UpdatedArgs),

  /// Switch to a branch
  #[command(long_about = "Check out a branch with 'git switch'. Fails when the working tree has\n\
            changes that would be overwritten.")]
  #[command(alias = "sw")]
  Switch(switch::SwitchArgs),

  /// Compare every branch against a reference branch
  #[command(long_about = "Show latest commit, merge base and ahead/behind counts for every branch\n\
            relative to a reference branch. The reference defaults to the configured\n\
            'reference' setting, then to the current branch.")]
  #[command(alias = "r")]
  Report(report::ReportArgs),
}

/// Shared state for command handlers.
pub struct Context {
  pub runner: GitRunner,
  pub settings: Settings,
  pub json: bool,
}

impl Context {
  /// Load settings and build the query engine for the selected repository.
  pub fn from_cli(cli: &Cli) -> Result<Self> {
    let settings = match &cli.config {
      Some(path) => Settings::load_from(path)?,
      None => Settings::load(&ConfigDirs::new()?)?,
    };
    debug!(?settings, "Loaded settings");

    let mut runner = GitRunner::from_settings(&settings, &cli.repo);
    if let Some(git) = &cli.git {
      runner = GitRunner::new(git, &cli.repo).with_concurrency_limit(settings.max_concurrency);
    }

    Ok(Self {
      runner,
      settings,
      json: cli.json,
    })
  }

  /// Look up a branch by name, failing when it does not exist.
  pub async fn branch(&self, name: &str) -> Result<Branch> {
    match self.runner.find_branch(name).await? {
      Some(branch) => Ok(branch),
      None => bail!("Branch '{name}' not found"),
    }
  }

  /// The branch to compare against: the explicit name, then the configured
  /// reference, then the current branch.
  pub async fn reference(&self, explicit: Option<&str>) -> Result<Branch> {
    if let Some(name) = explicit.or(self.settings.reference.as_deref()) {
      return self.branch(name).await;
    }

    self
      .runner
      .current_branch()
      .await?
      .context("No reference branch given and HEAD is not on a branch")
  }

  /// Print a value as pretty JSON.
  pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
  }
}

pub async fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let ctx = Context::from_cli(&cli)?;

  match cli.command {
    Commands::List(args) => list::handle_list_command(&ctx, args).await,
    Commands::Latest(args) => hash::handle_latest_command(&ctx, args).await,
    Commands::MergeBase(args) => hash::handle_merge_base_command(&ctx, args).await,
    Commands::Diff(args) => diff::handle_diff_command(&ctx, args).await,
    Commands::Updated(args) => updated::handle_updated_command(&ctx, args).await,
    Commands::Switch(args) => switch::handle_switch_command(&ctx, args).await,
    Commands::Report(args) => report::handle_report_command(&ctx, args).await,
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn verify_cli() {
    Cli::command().debug_assert();
  }

  #[test]
  fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from(["bough", "diff", "feature", "--json", "-r", "/tmp/repo", "-vv"]).unwrap();

    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.repo, PathBuf::from("/tmp/repo"));
    assert!(matches!(cli.command, Commands::Diff(_)));
  }

  #[test]
  fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["bough"]).is_err());
  }
}
