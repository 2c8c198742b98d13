//! # Text Rendering
//!
//! Plain-text projections of query results. Colors come from the shared
//! output helpers and are dropped automatically when stdout is not a
//! terminal.

use std::io::{self, Write};

use bough_core::output::{format_branch, format_divergence, format_hash};
use bough_core::{Branch, BranchComparison, BranchDiff};

/// One branch per line, current branch marked with `*`.
pub fn render_branch_list<W: Write>(writer: &mut W, branches: &[Branch]) -> io::Result<()> {
  for branch in branches {
    writeln!(writer, "{}", format_branch(branch))?;
  }
  Ok(())
}

/// Summary line for a diff, optionally followed by the hashes on each side.
pub fn render_diff<W: Write>(
  writer: &mut W,
  first: &Branch,
  second: &Branch,
  diff: &BranchDiff,
  show_hashes: bool,
) -> io::Result<()> {
  writeln!(
    writer,
    "{} {} vs {}",
    first.id(),
    format_divergence(diff.ahead_count(), diff.behind_count()),
    second.id()
  )?;

  if show_hashes {
    render_hash_section(writer, &format!("ahead (only on {first})"), diff.ahead())?;
    render_hash_section(writer, &format!("behind (only on {second})"), diff.behind())?;
  }

  Ok(())
}

fn render_hash_section<W: Write>(writer: &mut W, title: &str, hashes: &[String]) -> io::Result<()> {
  writeln!(writer, "{title}:")?;
  if hashes.is_empty() {
    writeln!(writer, "  (none)")?;
  }
  for hash in hashes {
    writeln!(writer, "  {hash}")?;
  }
  Ok(())
}

/// Aligned table of every branch compared against `reference`.
pub fn render_report<W: Write>(
  writer: &mut W,
  reference: &Branch,
  comparisons: &[BranchComparison],
) -> io::Result<()> {
  let width = comparisons
    .iter()
    .map(|comparison| comparison.branch.id().chars().count())
    .max()
    .unwrap_or(0);

  writeln!(writer, "Compared against {}", reference.id())?;

  for comparison in comparisons {
    let padding = width - comparison.branch.id().chars().count();
    let merged = if comparison.is_fully_merged() { "  merged" } else { "" };
    writeln!(
      writer,
      "{}{}  {}  base {}  {}{}",
      format_branch(&comparison.branch),
      " ".repeat(padding),
      format_hash(&comparison.latest),
      format_hash(&comparison.merge_base),
      format_divergence(comparison.diff.ahead_count(), comparison.diff.behind_count()),
      merged
    )?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use bough_core::{BranchKind, Resolved};

  use super::*;

  const TIP: &str = "1111111aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
  const BASE: &str = "2222222bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

  fn branch(id: &str, is_current: bool) -> Branch {
    Branch::new(id, BranchKind::Local, is_current).unwrap()
  }

  fn rendered(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buffer = Vec::new();
    render(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
  }

  #[test]
  fn branch_list_marks_current() {
    owo_colors::set_override(false);
    let branches = vec![branch("develop", false), branch("main", true)];

    assert_eq!(
      rendered(|out| render_branch_list(out, &branches)),
      "  develop\n* main\n"
    );
  }

  #[test]
  fn diff_summary_with_hashes() {
    owo_colors::set_override(false);
    let diff = BranchDiff::new(vec!["aaaaaaa".into(), "bbbbbbb".into()], vec![]);

    let out = rendered(|out| render_diff(out, &branch("feature", false), &branch("main", true), &diff, true));

    assert_eq!(
      out,
      "feature ↑2 ↓0 vs main\nahead (only on feature):\n  aaaaaaa\n  bbbbbbb\nbehind (only on main):\n  (none)\n"
    );
  }

  #[test]
  fn report_aligns_columns_and_flags_merged() {
    owo_colors::set_override(false);
    let comparisons = vec![
      BranchComparison {
        branch: branch("main", true),
        latest: Resolved::Commit(TIP.to_string()),
        merge_base: Resolved::Commit(TIP.to_string()),
        diff: BranchDiff::default(),
      },
      BranchComparison {
        branch: branch("feature/x", false),
        latest: Resolved::Commit(BASE.to_string()),
        merge_base: Resolved::Absent,
        diff: BranchDiff::new(vec!["ccccccc".into()], vec!["ddddddd".into()]),
      },
    ];

    let out = rendered(|out| render_report(out, &branch("main", true), &comparisons));

    assert_eq!(
      out,
      "Compared against main\n\
       * main       1111111  base 1111111  ↑0 ↓0  merged\n  \
       feature/x  2222222  base None  ↑1 ↓1\n"
    );
  }
}
