//! # Branch Ordering
//!
//! Alphabetic and commit-date orderings for branch listings. Both sorts are
//! stable, so the date sort keeps alphabetic order among equal timestamps.

use std::cmp::Ordering;
use std::collections::HashMap;

use feruca::{Collator, Locale, Tailoring};
use serde::{Deserialize, Serialize};

use crate::branch::Branch;

/// How a branch listing should be ordered.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
  /// Keep the order git reports
  #[default]
  None,
  /// Ascending by branch name
  Alphabetic,
  /// Most recently committed first
  CommitDate,
}

/// Stable ascending sort by branch id using [`collate`].
pub fn sort_alphabetic(branches: &mut [Branch]) {
  let mut collator = root_collator();
  branches.sort_by(|a, b| collator.collate(a.id(), b.id()));
}

/// Stable descending sort by the timestamp recorded for each branch id.
///
/// Branches missing from `timestamps` sort last.
pub fn sort_by_timestamp(branches: &mut [Branch], timestamps: &HashMap<String, i64>) {
  branches.sort_by(|a, b| {
    let a_time = timestamps.get(a.id()).copied().unwrap_or(i64::MIN);
    let b_time = timestamps.get(b.id()).copied().unwrap_or(i64::MIN);
    b_time.cmp(&a_time)
  });
}

/// Locale-aware string comparison using the Unicode Collation Algorithm
/// with the CLDR root order.
///
/// Punctuation and symbols are not ignorable, so `fix_a < fix-a < fix/a`.
/// Strings that collate equal fall back to byte order, which keeps the order
/// total.
pub fn collate(a: &str, b: &str) -> Ordering {
  root_collator().collate(a, b)
}

fn root_collator() -> Collator {
  Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}
