//! # Errors
//!
//! Failure types surfaced by the query engine. Expected absences (no commit
//! yet, no common ancestor) are not errors; see [`crate::Resolved`].

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure of a git subprocess.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The executable could not be started at all.
  #[error("failed to launch `{program} {command}`")]
  Spawn {
    program: String,
    command: String,
    #[source]
    source: io::Error,
  },
  /// The process ran but exited unsuccessfully.
  #[error("`git {command}` failed ({status}): {stderr}")]
  Exit {
    command: String,
    status: ExitStatus,
    stderr: String,
  },
  /// The process succeeded but printed something that could not be parsed.
  #[error("`git {command}` produced unexpected output: {output:?}")]
  UnexpectedOutput { command: String, output: String },
}

impl ProcessError {
  /// Exit code of the failed process, if it exited normally.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Self::Exit { status, .. } => status.code(),
      _ => None,
    }
  }

  /// Captured standard error of the failed process.
  pub fn stderr(&self) -> Option<&str> {
    match self {
      Self::Exit { stderr, .. } => Some(stderr),
      _ => None,
    }
  }
}

/// Invalid input when constructing a [`crate::Branch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchError {
  #[error("branch id must not be empty")]
  EmptyId,
}
