//! # Report Command
//!
//! Compares every listed branch against a reference branch.

use std::io;

use anyhow::Result;
use bough_core::output::print_warning;
use bough_core::{Branch, BranchComparison, BranchScope, ListOptions, SortMode};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::render::render_report;

/// Compare every branch against a reference branch
#[derive(Args)]
pub struct ReportArgs {
  /// Which branches to include
  #[arg(long, short = 'k', value_enum, default_value_t = BranchScope::Local)]
  pub kind: BranchScope,

  /// Ordering of the report (defaults to the `sort` setting)
  #[arg(long, short = 's', value_enum)]
  pub sort: Option<SortMode>,

  /// Branch to compare against (defaults to the `reference` setting, then
  /// the current branch)
  #[arg(long, value_name = "BRANCH")]
  pub reference: Option<String>,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
  reference: &'a Branch,
  branches: &'a [BranchComparison],
}

pub(crate) async fn handle_report_command(ctx: &Context, args: ReportArgs) -> Result<()> {
  let reference = ctx.reference(args.reference.as_deref()).await?;
  let options = ListOptions::sorted(args.sort.unwrap_or(ctx.settings.sort));

  let branches = ctx.runner.list_branches(args.kind, &options).await?;
  info!(reference = reference.id(), count = branches.len(), "Comparing branches");

  let comparisons = ctx.runner.compare_branches(&reference, &branches).await?;

  if ctx.json {
    return ctx.print_json(&ReportOutput {
      reference: &reference,
      branches: &comparisons,
    });
  }

  if comparisons.is_empty() {
    print_warning("No branches to compare.");
    return Ok(());
  }

  render_report(&mut io::stdout().lock(), &reference, &comparisons)?;
  Ok(())
}
