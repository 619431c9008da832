//! About command.

use crate::framework::{CommandOutput, Context};

/// Shows what the tool is and which data it is working on.
pub fn about(ctx: Context<'_>) -> CommandOutput {
    let table = ctx.manager.table();
    CommandOutput::Text(format!(
        "sgraph {}\n\
         Sales hierarchy aggregation and graph export.\n\
         Table: {} ({} records)\n\
         Expense policy: {:?}",
        env!("CARGO_PKG_VERSION"),
        ctx.config.data.csv_path.display(),
        table.len(),
        ctx.manager.aggregator().policy(),
    ))
}
