//! # List Command
//!
//! Lists branches of one or both kinds, optionally sorted.

use std::io;

use anyhow::Result;
use bough_core::{BranchScope, ListOptions, SortMode};
use clap::Args;

use super::Context;
use crate::render::render_branch_list;

/// List branches
#[derive(Args)]
pub struct ListArgs {
  /// Which branches to list
  #[arg(long, short = 'k', value_enum, default_value_t = BranchScope::Local)]
  pub kind: BranchScope,

  /// Ordering of the listing (defaults to the `sort` setting)
  #[arg(long, short = 's', value_enum)]
  pub sort: Option<SortMode>,

  /// Extra flags passed through to `git branch`
  #[arg(last = true, allow_hyphen_values = true, value_name = "GIT_FLAGS")]
  pub flags: Vec<String>,
}

pub(crate) async fn handle_list_command(ctx: &Context, args: ListArgs) -> Result<()> {
  let options = ListOptions {
    flags: args.flags,
    sort: args.sort.unwrap_or(ctx.settings.sort),
  };

  let branches = ctx.runner.list_branches(args.kind, &options).await?;

  if ctx.json {
    return ctx.print_json(&branches);
  }

  render_branch_list(&mut io::stdout().lock(), &branches)?;
  Ok(())
}
