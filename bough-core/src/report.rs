//! Per-branch comparison records against a reference branch.

use serde::Serialize;

use crate::branch::Branch;
use crate::diff::BranchDiff;
use crate::resolved::Resolved;

/// Everything a branch-comparison view shows for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchComparison {
  pub branch: Branch,
  /// Tip of the branch.
  pub latest: Resolved,
  /// Common ancestor with the reference branch.
  pub merge_base: Resolved,
  /// `ahead` = commits on the branch missing from the reference.
  pub diff: BranchDiff,
}

impl BranchComparison {
  /// The reference branch already contains every commit of this branch.
  pub fn is_fully_merged(&self) -> bool {
    self.diff.is_merged()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::branch::BranchKind;

  fn comparison(ahead: &str, behind: &str) -> BranchComparison {
    BranchComparison {
      branch: Branch::new("feature/x", BranchKind::Local, false).unwrap(),
      latest: Resolved::Commit("0123456789abcdef0123456789abcdef01234567".to_string()),
      merge_base: Resolved::Absent,
      diff: BranchDiff::from_rev_lists(ahead, behind),
    }
  }

  #[test]
  fn fully_merged_when_nothing_ahead() {
    assert!(comparison("", "fedcba9876543210fedcba9876543210fedcba98").is_fully_merged());
    assert!(!comparison("fedcba9876543210fedcba9876543210fedcba98", "").is_fully_merged());
  }

  #[test]
  fn serializes_sentinel_and_nested_diff() {
    let json = serde_json::to_value(comparison("", "")).unwrap();

    assert_eq!(json["branch"]["id"], "feature/x");
    assert_eq!(json["mergeBase"], "None");
    assert_eq!(json["latest"], "0123456789abcdef0123456789abcdef01234567");
    assert_eq!(json["diff"]["unionCount"], 0);
  }
}
