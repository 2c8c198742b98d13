//! Git repository fixtures for testing
//!
//! Repositories are created with `git2` so fixtures never depend on the
//! porcelain under test. Every repository starts on an unborn `main` branch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

/// Timestamp used by [`create_commit`] when the caller does not care about
/// commit dates (2023-11-14T22:13:20Z).
pub const DEFAULT_COMMIT_TIME: i64 = 1_700_000_000;

/// A temporary git repository that is removed when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create an empty repository whose unborn HEAD points at `main`.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let mut options = RepositoryInitOptions::new();
    options.initial_head("main");
    let repo = Repository::init_opts(temp_dir.path(), &options).expect("Failed to initialize git repository");

    // Set test user configuration so porcelain commands never prompt
    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Bough Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "bough-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_dir.path().join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the repository's working directory
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a commit on HEAD with the default timestamp.
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<Oid> {
  create_commit_at(repo, file_name, content, message, DEFAULT_COMMIT_TIME)
}

/// Create a commit on HEAD whose author and committer dates are both
/// `timestamp` (seconds since the epoch, UTC).
pub fn create_commit_at(repo: &Repository, file_name: &str, content: &str, message: &str, timestamp: i64) -> Result<Oid> {
  let workdir = repo.workdir().context("Repository has no working directory")?;
  fs::write(workdir.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;

  let signature = Signature::new("Test User", "test@example.com", &Time::new(timestamp, 0))?;

  let parent = match repo.head() {
    Ok(head) => Some(head.peel_to_commit()?),
    Err(_) => None,
  };
  let parents: Vec<_> = parent.iter().collect();

  let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
  Ok(oid)
}

/// Create a local branch pointing at `start_point` (a local branch name) or
/// at HEAD when no start point is given.
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let commit = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &commit, false)?;
  Ok(())
}

/// Check out a local branch, updating index and working tree.
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let commit = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  repo.checkout_tree(commit.as_object(), Some(git2::build::CheckoutBuilder::new().force()))?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}

/// Create `refs/remotes/<remote>/<branch>` pointing at the tip of the local
/// branch `local`, plus the symbolic `refs/remotes/<remote>/HEAD` that a
/// clone would carry.
pub fn create_remote_ref(repo: &Repository, remote: &str, branch: &str, local: &str) -> Result<()> {
  let target = repo
    .find_branch(local, BranchType::Local)?
    .into_reference()
    .peel_to_commit()?
    .id();

  let remote_ref = format!("refs/remotes/{remote}/{branch}");
  repo.reference(&remote_ref, target, true, "create remote-tracking ref")?;
  repo.reference_symbolic(
    &format!("refs/remotes/{remote}/HEAD"),
    &remote_ref,
    true,
    "create remote HEAD",
  )?;

  Ok(())
}

/// Full hash of the commit HEAD points at.
pub fn head_oid(repo: &Repository) -> Result<String> {
  Ok(repo.head()?.peel_to_commit()?.id().to_string())
}
