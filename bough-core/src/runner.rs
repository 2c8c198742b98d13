//! # Repository Query Engine
//!
//! [`GitRunner`] is the only place bough talks to git. Every fact is fetched
//! with one porcelain subprocess (`branch`, `rev-parse`, `merge-base`,
//! `rev-list`, `log`, `switch`); independent lookups are issued together and
//! joined before any ordering is applied.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::batch::{try_map_keyed, try_map_ordered};
use crate::branch::{Branch, BranchKind, BranchScope};
use crate::config::Settings;
use crate::consts::GIT_EXECUTABLE;
use crate::diff::BranchDiff;
use crate::error::ProcessError;
use crate::report::BranchComparison;
use crate::resolved::Resolved;
use crate::sort::{SortMode, sort_alphabetic, sort_by_timestamp};

/// Date styles understood by `git log --date=<style>`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
  /// Git's default date format
  #[default]
  Default,
  /// Relative to now, e.g. "2 hours ago"
  Relative,
  /// Default format in the local timezone
  Local,
  /// ISO 8601-like format
  Iso,
  /// RFC 2822 format
  Rfc,
}

impl DateFormat {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Default => "default",
      Self::Relative => "relative",
      Self::Local => "local",
      Self::Iso => "iso",
      Self::Rfc => "rfc",
    }
  }
}

/// Options for [`GitRunner::list_branches`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
  /// Extra flags passed to `git branch`, e.g. `--merged main`.
  pub flags: Vec<String>,
  pub sort: SortMode,
}

impl ListOptions {
  pub fn sorted(sort: SortMode) -> Self {
    Self {
      flags: Vec::new(),
      sort,
    }
  }
}

/// Runs git porcelain commands against one repository.
#[derive(Debug, Clone)]
pub struct GitRunner {
  git_path: PathBuf,
  repo_path: PathBuf,
  concurrency: Option<NonZeroUsize>,
}

impl GitRunner {
  pub fn new(git_path: impl Into<PathBuf>, repo_path: impl Into<PathBuf>) -> Self {
    Self {
      git_path: git_path.into(),
      repo_path: repo_path.into(),
      concurrency: None,
    }
  }

  /// Use the platform's default git executable found on `PATH`.
  pub fn with_default_git(repo_path: impl Into<PathBuf>) -> Self {
    Self::new(GIT_EXECUTABLE, repo_path)
  }

  /// Build a runner from user settings.
  pub fn from_settings(settings: &Settings, repo_path: impl Into<PathBuf>) -> Self {
    Self::new(settings.resolved_git_path(), repo_path).with_concurrency_limit(settings.max_concurrency)
  }

  /// Cap the number of branches a batched lookup works on at once.
  ///
  /// Each commit-date lookup runs one git process per branch, while
  /// [`GitRunner::compare_branches`] runs four (latest hash, merge base and
  /// both rev-lists), so a limit of `n` allows up to `4 * n` processes there.
  pub fn with_concurrency_limit(mut self, limit: Option<NonZeroUsize>) -> Self {
    self.concurrency = limit;
    self
  }

  pub fn git_path(&self) -> &Path {
    &self.git_path
  }

  pub fn repo_path(&self) -> &Path {
    &self.repo_path
  }

  /// Run `git <subcommand> <args..>` in the repository and return its
  /// standard output with surrounding whitespace trimmed.
  pub async fn run(&self, subcommand: &str, args: &[&str]) -> Result<String, ProcessError> {
    let command = command_line(subcommand, args);
    debug!(repo = %self.repo_path.display(), "git {command}");

    let output = Command::new(&self.git_path)
      .arg(subcommand)
      .args(args)
      .current_dir(&self.repo_path)
      .output()
      .await
      .map_err(|source| ProcessError::Spawn {
        program: self.git_path.display().to_string(),
        command: command.clone(),
        source,
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      trace!(status = %output.status, %stderr, "git {command} failed");
      return Err(ProcessError::Exit {
        command,
        status: output.status,
        stderr,
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    trace!(bytes = stdout.len(), "git {command} finished");
    Ok(stdout)
  }

  /// List branches of the given scope, optionally sorted.
  ///
  /// [`BranchScope::All`] lists local and remote branches concurrently and
  /// returns the local ones first. Each half is sorted on its own.
  pub async fn list_branches(&self, scope: BranchScope, options: &ListOptions) -> Result<Vec<Branch>, ProcessError> {
    match scope {
      BranchScope::Local => self.list_kind(BranchKind::Local, options).await,
      BranchScope::Remote => self.list_kind(BranchKind::Remote, options).await,
      BranchScope::All => {
        let (mut local, remote) = tokio::try_join!(
          self.list_kind(BranchKind::Local, options),
          self.list_kind(BranchKind::Remote, options),
        )?;
        local.extend(remote);
        Ok(local)
      }
    }
  }

  async fn list_kind(&self, kind: BranchKind, options: &ListOptions) -> Result<Vec<Branch>, ProcessError> {
    let mut args = vec!["--no-color", kind.list_flag()];
    args.extend(options.flags.iter().map(String::as_str));

    let output = self.run("branch", &args).await?;
    let mut branches = parse_branch_list(&output, kind);

    match options.sort {
      SortMode::None => {}
      SortMode::Alphabetic => sort_alphabetic(&mut branches),
      SortMode::CommitDate => {
        sort_alphabetic(&mut branches);
        let timestamps = self.commit_timestamps(&branches).await?;
        sort_by_timestamp(&mut branches, &timestamps);
      }
    }

    Ok(branches)
  }

  /// Unix committer timestamp of each branch's tip, keyed by branch id.
  async fn commit_timestamps(&self, branches: &[Branch]) -> Result<HashMap<String, i64>, ProcessError> {
    try_map_keyed(
      branches,
      self.concurrency,
      |branch| branch.id().to_string(),
      |branch| async move {
        let args = ["-1", "--format=%cd", "--date=unix", branch.ref_name()];
        let output = self.run("log", &args).await?;
        output.parse::<i64>().map_err(|_| ProcessError::UnexpectedOutput {
          command: command_line("log", &args),
          output,
        })
      },
    )
    .await
  }

  /// Find a branch by its short name. Local branches win over remote ones
  /// with the same id.
  pub async fn find_branch(&self, name: &str) -> Result<Option<Branch>, ProcessError> {
    let branches = self.list_branches(BranchScope::All, &ListOptions::default()).await?;
    Ok(branches.into_iter().find(|branch| branch.id() == name))
  }

  /// The checked-out local branch, if HEAD is attached to one.
  pub async fn current_branch(&self) -> Result<Option<Branch>, ProcessError> {
    let branches = self.list_branches(BranchScope::Local, &ListOptions::default()).await?;
    Ok(branches.into_iter().find(Branch::is_current))
  }

  /// Full hash of the branch tip, or of HEAD when `branch` is `None`.
  ///
  /// Returns [`Resolved::Absent`] when the ref cannot be resolved, e.g. in a
  /// repository without commits.
  pub async fn latest_hash(&self, branch: Option<&Branch>) -> Resolved {
    let target = branch.map_or("HEAD", Branch::ref_name);
    self.resolve("rev-parse", &[target]).await
  }

  /// Best common ancestor of two branches, or [`Resolved::Absent`] when the
  /// histories are unrelated or either ref is missing.
  pub async fn merge_base_hash(&self, first: &Branch, second: &Branch) -> Resolved {
    self.resolve("merge-base", &[first.ref_name(), second.ref_name()]).await
  }

  async fn resolve(&self, subcommand: &str, args: &[&str]) -> Resolved {
    match self.run(subcommand, args).await {
      Ok(hash) if !hash.is_empty() => Resolved::Commit(hash),
      Ok(_) => Resolved::Absent,
      Err(err @ ProcessError::Spawn { .. }) => {
        warn!("{err}");
        Resolved::Absent
      }
      Err(err) => {
        debug!("treating failure as no commit: {err}");
        Resolved::Absent
      }
    }
  }

  /// Commits exclusive to each of two branches.
  ///
  /// `ahead` holds commits reachable from `first` but not `second`; `behind`
  /// holds commits reachable from `second` but not `first`. Both ranges are
  /// queried concurrently.
  pub async fn branch_diff(&self, first: &Branch, second: &Branch) -> Result<BranchDiff, ProcessError> {
    let ahead_range = format!("{}..{}", second.ref_name(), first.ref_name());
    let behind_range = format!("{}..{}", first.ref_name(), second.ref_name());

    let ahead_args = [ahead_range.as_str()];
    let behind_args = [behind_range.as_str()];

    let (ahead, behind) = tokio::try_join!(
      self.run("rev-list", &ahead_args),
      self.run("rev-list", &behind_args),
    )?;

    Ok(BranchDiff::from_rev_lists(&ahead, &behind))
  }

  /// Date of the last commit on `branch` (or HEAD), formatted by git.
  pub async fn updated_time(&self, branch: Option<&Branch>, format: DateFormat) -> Result<String, ProcessError> {
    let date = format!("--date={}", format.as_str());
    let target = branch.map_or("HEAD", Branch::ref_name);
    self.run("log", &["-1", "--format=%cd", &date, target]).await
  }

  /// Check out `branch` by its short name.
  pub async fn switch_to_branch(&self, branch: &Branch) -> Result<(), ProcessError> {
    self.run("switch", &[branch.id()]).await?;
    debug!(branch = branch.id(), "switched branch");
    Ok(())
  }

  /// Compare every branch against `reference`: latest hash, merge base and
  /// diff, gathered concurrently. Results follow the order of `branches`.
  pub async fn compare_branches(
    &self,
    reference: &Branch,
    branches: &[Branch],
  ) -> Result<Vec<BranchComparison>, ProcessError> {
    try_map_ordered(branches, self.concurrency, |branch| async move {
      let (latest, merge_base, diff) = tokio::join!(
        self.latest_hash(Some(branch)),
        self.merge_base_hash(branch, reference),
        self.branch_diff(branch, reference),
      );

      diff.map(|diff| BranchComparison {
        branch: branch.clone(),
        latest,
        merge_base,
        diff,
      })
    })
    .await
  }
}

/// Parse `git branch` output into branches of one kind.
///
/// Blank lines, symbolic `HEAD` entries (`origin/HEAD -> origin/main`) and
/// detached or in-progress states such as `(HEAD detached at ..)` and
/// `(no branch, rebasing topic)` are skipped. A leading `*` marks the current
/// branch; a leading `+` marks a branch checked out in another worktree.
pub fn parse_branch_list(output: &str, kind: BranchKind) -> Vec<Branch> {
  output
    .lines()
    .filter(|line| !line.trim().is_empty() && !line.contains("HEAD "))
    .filter_map(|line| {
      let line = line.trim_start();
      let (is_current, name) = match line.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, line.strip_prefix('+').unwrap_or(line)),
      };
      let name = name.trim();
      if name.starts_with('(') {
        return None;
      }
      Branch::new(name, kind, is_current).ok()
    })
    .collect()
}

fn command_line(subcommand: &str, args: &[&str]) -> String {
  let mut command = subcommand.to_string();
  for arg in args {
    command.push(' ');
    command.push_str(arg);
  }
  command
}
