//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::{OwoColorize, Stream};
use {clap, emojis};

use crate::branch::{Branch, BranchKind};
use crate::resolved::{Resolved, abbreviate};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the process-wide color override.
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      // Let owo_colors detect terminal support on its own
      Self::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!(
    "{} {}",
    check.if_supports_color(Stream::Stdout, |text| text.green().bold().to_string()),
    message
  );
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |text| text.red().bold().to_string()),
    message
  );
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!(
    "{} {}",
    warning.if_supports_color(Stream::Stdout, |text| text.yellow().bold().to_string()),
    message
  );
}

/// Format a branch name; the current branch is marked and highlighted
pub fn format_branch(branch: &Branch) -> String {
  let id = branch.id();
  match (branch.is_current(), branch.kind()) {
    (true, _) => format!(
      "* {}",
      id.if_supports_color(Stream::Stdout, |text| text.bright_green().bold().to_string())
    ),
    (false, BranchKind::Local) => format!("  {}", id.if_supports_color(Stream::Stdout, |text| text.bright_cyan())),
    (false, BranchKind::Remote) => format!("  {}", id.if_supports_color(Stream::Stdout, |text| text.bright_red())),
  }
}

/// Format an abbreviated commit hash, dimming the absence sentinel
pub fn format_hash(resolved: &Resolved) -> String {
  match resolved.commit() {
    Some(hash) => abbreviate(hash)
      .if_supports_color(Stream::Stdout, |text| text.yellow())
      .to_string(),
    None => resolved
      .short()
      .if_supports_color(Stream::Stdout, |text| text.bright_black())
      .to_string(),
  }
}

/// Format ahead/behind counts as `↑ahead ↓behind`
pub fn format_divergence(ahead: usize, behind: usize) -> String {
  let ahead = format!("↑{ahead}");
  let behind = format!("↓{behind}");
  format!(
    "{} {}",
    ahead.if_supports_color(Stream::Stdout, |text| text.green()),
    behind.if_supports_color(Stream::Stdout, |text| text.red())
  )
}

/// Format a commit date
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .if_supports_color(Stream::Stdout, |text| text.yellow())
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    // Test with a known emoji
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    // Test with unknown emoji
    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_functions() {
    owo_colors::set_override(false);

    let current = Branch::new("main", BranchKind::Local, true).unwrap();
    let remote = Branch::new("origin/main", BranchKind::Remote, false).unwrap();
    assert_eq!(format_branch(&current), "* main");
    assert_eq!(format_branch(&remote), "  origin/main");

    let hash = Resolved::Commit("89abcdef0123456789abcdef0123456789abcdef".to_string());
    assert_eq!(format_hash(&hash), "89abcde");
    assert_eq!(format_hash(&Resolved::Absent), "None");

    assert_eq!(format_divergence(2, 0), "↑2 ↓0");
    assert_eq!(format_hash(&Resolved::Commit("abc".to_string())), "abc");
    assert!(!format_timestamp("2 days ago").is_empty());
  }
}
