//! # Branch Registry
//!
//! Value types describing a single branch as reported by `git branch`.
//! A [`Branch`] is created fresh on every listing and never mutated; its ref
//! path and display name are derived once from the id and kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BranchError;

/// Whether a branch lives in the local heads or the remote-tracking namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
  Local,
  Remote,
}

impl BranchKind {
  /// Ref namespace holding branches of this kind.
  pub const fn ref_prefix(self) -> &'static str {
    match self {
      Self::Local => "refs/heads/",
      Self::Remote => "refs/remotes/",
    }
  }

  /// `git branch` flag restricting the listing to this kind.
  pub const fn list_flag(self) -> &'static str {
    match self {
      Self::Local => "-l",
      Self::Remote => "-r",
    }
  }
}

impl fmt::Display for BranchKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Local => f.write_str("local"),
      Self::Remote => f.write_str("remote"),
    }
  }
}

/// Which branches a listing should include.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchScope {
  /// Local branches only
  #[default]
  Local,
  /// Remote-tracking branches only
  Remote,
  /// Local branches followed by remote-tracking branches
  All,
}

/// A branch as reported by the repository at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
  id: String,
  kind: BranchKind,
  is_current: bool,
  #[serde(rename = "ref")]
  ref_name: String,
  display_name: String,
}

impl Branch {
  /// Build a branch from its short name, kind and checkout flag.
  ///
  /// Fails when `id` is empty or only whitespace.
  pub fn new(id: impl Into<String>, kind: BranchKind, is_current: bool) -> Result<Self, BranchError> {
    let id = id.into();
    if id.trim().is_empty() {
      return Err(BranchError::EmptyId);
    }

    let ref_name = format!("{}{id}", kind.ref_prefix());
    let display_name = id.rsplit('/').next().unwrap_or(&id).to_string();

    Ok(Self {
      id,
      kind,
      is_current,
      ref_name,
      display_name,
    })
  }

  /// Short name, e.g. `feature/x` or `origin/main`.
  pub fn id(&self) -> &str {
    &self.id
  }

  pub const fn kind(&self) -> BranchKind {
    self.kind
  }

  /// Whether this branch was checked out when it was listed.
  pub const fn is_current(&self) -> bool {
    self.is_current
  }

  /// Fully-qualified ref, e.g. `refs/heads/feature/x`.
  pub fn ref_name(&self) -> &str {
    &self.ref_name
  }

  /// Final path segment of the id.
  pub fn display_name(&self) -> &str {
    &self.display_name
  }
}

impl fmt::Display for Branch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.id)
  }
}
