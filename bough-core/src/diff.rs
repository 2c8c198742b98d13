//! # Branch Diff
//!
//! Commit-set difference between two branches, built from two
//! `git rev-list` ranges.
//!
//! Convention: for `branch_diff(a, b)`, `ahead` lists the commits reachable
//! from `a` but not from `b`, `behind` lists the commits reachable from `b`
//! but not from `a`. `union` is `behind` followed by `ahead`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::resolved::abbreviate;

/// Commits exclusive to each side of a comparison, abbreviated to 7
/// characters and kept in `rev-list` order (newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchDiff {
  ahead: Vec<String>,
  behind: Vec<String>,
  union: Vec<String>,
}

impl BranchDiff {
  /// Build a diff from the raw outputs of the two range queries.
  pub fn from_rev_lists(ahead_output: &str, behind_output: &str) -> Self {
    Self::new(parse_rev_list(ahead_output), parse_rev_list(behind_output))
  }

  pub fn new(ahead: Vec<String>, behind: Vec<String>) -> Self {
    let union = behind.iter().chain(&ahead).cloned().collect();
    Self { ahead, behind, union }
  }

  /// Commits on the first branch that the second lacks.
  pub fn ahead(&self) -> &[String] {
    &self.ahead
  }

  /// Commits on the second branch that the first lacks.
  pub fn behind(&self) -> &[String] {
    &self.behind
  }

  /// `behind` followed by `ahead`.
  pub fn union(&self) -> &[String] {
    &self.union
  }

  pub fn ahead_count(&self) -> usize {
    self.ahead.len()
  }

  pub fn behind_count(&self) -> usize {
    self.behind.len()
  }

  pub fn union_count(&self) -> usize {
    self.union.len()
  }

  /// The first branch has nothing the second lacks.
  pub fn is_merged(&self) -> bool {
    self.ahead.is_empty()
  }

  /// Neither branch has commits the other lacks.
  pub fn is_identical(&self) -> bool {
    self.ahead.is_empty() && self.behind.is_empty()
  }
}

impl Serialize for BranchDiff {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("BranchDiff", 6)?;
    state.serialize_field("ahead", &self.ahead)?;
    state.serialize_field("aheadCount", &self.ahead_count())?;
    state.serialize_field("behind", &self.behind)?;
    state.serialize_field("behindCount", &self.behind_count())?;
    state.serialize_field("union", &self.union)?;
    state.serialize_field("unionCount", &self.union_count())?;
    state.end()
  }
}

/// Split `rev-list` output into abbreviated hashes, dropping blank lines.
pub fn parse_rev_list(output: &str) -> Vec<String> {
  output
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|hash| abbreviate(hash).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const AHEAD: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678\nb2c3d4e5f60718293a4b5c6d7e8f901234567890\n";
  const BEHIND: &str = "c3d4e5f60718293a4b5c6d7e8f90123456789012";

  #[test]
  fn rev_list_output_is_abbreviated() {
    assert_eq!(parse_rev_list(AHEAD), vec!["a1b2c3d", "b2c3d4e"]);
  }

  #[test]
  fn blank_rev_list_is_empty() {
    assert!(parse_rev_list("").is_empty());
    assert!(parse_rev_list("\n  \n").is_empty());
  }

  #[test]
  fn union_lists_behind_before_ahead() {
    let diff = BranchDiff::from_rev_lists(AHEAD, BEHIND);

    assert_eq!(diff.ahead(), ["a1b2c3d", "b2c3d4e"]);
    assert_eq!(diff.behind(), ["c3d4e5f"]);
    assert_eq!(diff.union(), ["c3d4e5f", "a1b2c3d", "b2c3d4e"]);
    assert_eq!(diff.union_count(), diff.ahead_count() + diff.behind_count());
    assert!(!diff.is_merged());
    assert!(!diff.is_identical());
  }

  #[test]
  fn empty_ranges_are_identical() {
    let diff = BranchDiff::from_rev_lists("", "");

    assert!(diff.is_identical());
    assert!(diff.is_merged());
    assert_eq!(diff.union_count(), 0);
  }

  #[test]
  fn serializes_counts_alongside_lists() {
    let diff = BranchDiff::from_rev_lists("", BEHIND);
    let json = serde_json::to_value(&diff).unwrap();

    assert_eq!(json["aheadCount"], 0);
    assert_eq!(json["behindCount"], 1);
    assert_eq!(json["unionCount"], 1);
    assert_eq!(json["behind"][0], "c3d4e5f");
  }
}
