//! # Diff Command
//!
//! Commits exclusive to each of two branches.

use std::io;

use anyhow::Result;
use bough_core::{Branch, BranchDiff};
use clap::Args;
use serde::Serialize;

use super::Context;
use crate::render::render_diff;

/// Show commits exclusive to each of two branches
#[derive(Args)]
pub struct DiffArgs {
  /// Branch whose exclusive commits count as "ahead"
  #[arg(required = true, index = 1)]
  pub first: String,

  /// Branch to compare against (defaults to the reference branch)
  #[arg(index = 2)]
  pub second: Option<String>,

  /// List the abbreviated hashes on each side
  #[arg(long)]
  pub hashes: bool,
}

#[derive(Serialize)]
struct DiffOutput<'a> {
  first: &'a Branch,
  second: &'a Branch,
  #[serde(flatten)]
  diff: &'a BranchDiff,
}

pub(crate) async fn handle_diff_command(ctx: &Context, args: DiffArgs) -> Result<()> {
  let first = ctx.branch(&args.first).await?;
  let second = match &args.second {
    Some(name) => ctx.branch(name).await?,
    None => ctx.reference(None).await?,
  };

  let diff = ctx.runner.branch_diff(&first, &second).await?;

  if ctx.json {
    return ctx.print_json(&DiffOutput {
      first: &first,
      second: &second,
      diff: &diff,
    });
  }

  render_diff(&mut io::stdout().lock(), &first, &second, &diff, args.hashes)?;
  Ok(())
}
