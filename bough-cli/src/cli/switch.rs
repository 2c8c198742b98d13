//! # Switch Command
//!
//! Checks out a branch with `git switch`.

use anyhow::Result;
use bough_core::output::print_success;
use clap::Args;

use super::Context;

/// Switch to a branch
#[derive(Args)]
pub struct SwitchArgs {
  /// Branch to check out
  #[arg(required = true, index = 1)]
  pub branch: String,
}

pub(crate) async fn handle_switch_command(ctx: &Context, args: SwitchArgs) -> Result<()> {
  let branch = ctx.branch(&args.branch).await?;

  ctx.runner.switch_to_branch(&branch).await?;

  if ctx.json {
    return ctx.print_json(&branch);
  }

  print_success(&format!("Switched to branch '{branch}'"));
  Ok(())
}
