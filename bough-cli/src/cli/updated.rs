//! # Updated Command
//!
//! Date of the latest commit on a branch, formatted by git.

use anyhow::Result;
use bough_core::DateFormat;
use bough_core::output::format_timestamp;
use clap::Args;
use serde::Serialize;

use super::Context;

/// Show when a branch was last updated
#[derive(Args)]
pub struct UpdatedArgs {
  /// Branch to inspect (defaults to HEAD)
  #[arg(index = 1)]
  pub branch: Option<String>,

  /// Date style (defaults to the `date-format` setting)
  #[arg(long, short = 'f', value_enum)]
  pub format: Option<DateFormat>,
}

#[derive(Serialize)]
struct UpdatedOutput<'a> {
  target: &'a str,
  format: DateFormat,
  updated: &'a str,
}

pub(crate) async fn handle_updated_command(ctx: &Context, args: UpdatedArgs) -> Result<()> {
  let branch = match &args.branch {
    Some(name) => Some(ctx.branch(name).await?),
    None => None,
  };
  let format = args.format.unwrap_or(ctx.settings.date_format);

  let updated = ctx.runner.updated_time(branch.as_ref(), format).await?;

  if ctx.json {
    return ctx.print_json(&UpdatedOutput {
      target: args.branch.as_deref().unwrap_or("HEAD"),
      format,
      updated: &updated,
    });
  }

  println!("{}", format_timestamp(&updated));
  Ok(())
}
