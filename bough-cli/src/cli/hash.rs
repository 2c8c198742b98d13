//! # Hash Commands
//!
//! `latest` and `merge-base`: single commit lookups that print the `None`
//! sentinel instead of failing when there is no such commit.

use anyhow::Result;
use bough_core::Resolved;
use clap::Args;
use serde::Serialize;

use super::Context;

/// Show the latest commit of a branch
#[derive(Args)]
pub struct LatestArgs {
  /// Branch to inspect (defaults to HEAD)
  #[arg(index = 1)]
  pub branch: Option<String>,

  /// Print the abbreviated hash
  #[arg(long)]
  pub short: bool,
}

/// Show the common ancestor of two branches
#[derive(Args)]
pub struct MergeBaseArgs {
  /// First branch
  #[arg(required = true, index = 1)]
  pub first: String,

  /// Second branch (defaults to the reference branch)
  #[arg(index = 2)]
  pub second: Option<String>,

  /// Print the abbreviated hash
  #[arg(long)]
  pub short: bool,
}

#[derive(Serialize)]
struct HashOutput<'a> {
  target: &'a str,
  hash: &'a Resolved,
  short: &'a str,
}

pub(crate) async fn handle_latest_command(ctx: &Context, args: LatestArgs) -> Result<()> {
  let branch = match &args.branch {
    Some(name) => Some(ctx.branch(name).await?),
    None => None,
  };

  let latest = ctx.runner.latest_hash(branch.as_ref()).await;
  let target = args.branch.as_deref().unwrap_or("HEAD");

  print_hash(ctx, target, &latest, args.short)
}

pub(crate) async fn handle_merge_base_command(ctx: &Context, args: MergeBaseArgs) -> Result<()> {
  let first = ctx.branch(&args.first).await?;
  let second = match &args.second {
    Some(name) => ctx.branch(name).await?,
    None => ctx.reference(None).await?,
  };

  let base = ctx.runner.merge_base_hash(&first, &second).await;
  let target = format!("{first}...{second}");

  print_hash(ctx, &target, &base, args.short)
}

fn print_hash(ctx: &Context, target: &str, resolved: &Resolved, short: bool) -> Result<()> {
  if ctx.json {
    return ctx.print_json(&HashOutput {
      target,
      hash: resolved,
      short: resolved.short(),
    });
  }

  if short {
    println!("{}", resolved.short());
  } else {
    println!("{resolved}");
  }
  Ok(())
}
