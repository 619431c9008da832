//! Report command: writes exports of a scope to disk.

use crate::framework::{CommandOutput, Context, Error};
use sgraph_common::Scope;
use sgraph_config::ExportFormat;
use std::path::PathBuf;

/// Writes `scope` in each of `formats`, or in the configured default format
/// when none are given.
pub async fn report(
    ctx: Context<'_>,
    scope: &Scope,
    formats: &[ExportFormat],
    output_dir: Option<PathBuf>,
) -> Result<CommandOutput, Error> {
    let manager = match output_dir {
        Some(dir) => ctx.manager.clone().with_output_dir(dir),
        None => ctx.manager.clone(),
    };

    let default = [ctx.config.report.export_format];
    let formats = if formats.is_empty() { &default[..] } else { formats };

    let paths = manager.export_all(scope, formats).await?;
    Ok(CommandOutput::Written(paths))
}
