//! Commit lookups that may legitimately find nothing.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::consts::{ABSENT_COMMIT, SHORT_HASH_LEN};

/// Outcome of resolving a commit: either a full hash, or the documented
/// absence (empty repository, unborn branch, unrelated histories).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolved {
  Commit(String),
  Absent,
}

impl Resolved {
  /// The full hash, or `"None"` when absent.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Commit(hash) => hash,
      Self::Absent => ABSENT_COMMIT,
    }
  }

  /// The abbreviated hash, or `"None"` when absent.
  pub fn short(&self) -> &str {
    match self {
      Self::Commit(hash) => abbreviate(hash),
      Self::Absent => ABSENT_COMMIT,
    }
  }

  pub fn commit(&self) -> Option<&str> {
    match self {
      Self::Commit(hash) => Some(hash),
      Self::Absent => None,
    }
  }

  pub const fn is_absent(&self) -> bool {
    matches!(self, Self::Absent)
  }
}

impl fmt::Display for Resolved {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Resolved {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Fixed-length prefix of a hash. Shorter input is returned whole.
pub fn abbreviate(hash: &str) -> &str {
  hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
  use super::*;

  const HASH: &str = "3f786850e387550fdab836ed7e6dc881de23001b";

  #[test]
  fn commit_renders_full_and_short_hash() {
    let resolved = Resolved::Commit(HASH.to_string());

    assert_eq!(resolved.as_str(), HASH);
    assert_eq!(resolved.short(), "3f78685");
    assert_eq!(resolved.commit(), Some(HASH));
    assert!(!resolved.is_absent());
  }

  #[test]
  fn absent_renders_sentinel() {
    assert_eq!(Resolved::Absent.as_str(), "None");
    assert_eq!(Resolved::Absent.short(), "None");
    assert_eq!(Resolved::Absent.to_string(), "None");
    assert_eq!(Resolved::Absent.commit(), None);
  }

  #[test]
  fn serializes_as_plain_string() {
    assert_eq!(serde_json::to_string(&Resolved::Absent).unwrap(), "\"None\"");
    assert_eq!(
      serde_json::to_string(&Resolved::Commit(HASH.to_string())).unwrap(),
      format!("\"{HASH}\"")
    );
  }

  #[test]
  fn abbreviate_keeps_short_input() {
    assert_eq!(abbreviate("abc"), "abc");
    assert_eq!(abbreviate(HASH), "3f78685");
  }
}
