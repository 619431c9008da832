//! Summary command.

use crate::framework::{CommandOutput, Context, Error};
use sgraph_config::ExportFormat;
use sgraph_common::Scope;

/// Prints the Markdown performance summary of `scope`.
pub async fn summary(ctx: Context<'_>, scope: &Scope) -> Result<CommandOutput, Error> {
    let bytes = ctx.manager.render(scope, ExportFormat::Markdown).await?;
    Ok(CommandOutput::Text(String::from_utf8(bytes)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Data;
    use sgraph_common::test_utils::record_fixtures::sample_table;
    use sgraph_common::HierarchyLevel;
    use sgraph_config::Config;
    use sgraph_graphs::EmployeeTable;

    #[tokio::test]
    async fn test_summary_of_distributor() {
        let data = Data::new(Config::default(), EmployeeTable::from_records(sample_table()));
        let output = summary(&data, &Scope::entity(HierarchyLevel::Distributor, "D1"))
            .await
            .unwrap();
        let text = output.to_string();
        assert!(text.starts_with("# Performance Summary: Distributor: D1"));
        assert!(text.contains("| Records | 3 |"));
    }

    #[tokio::test]
    async fn test_unknown_scope_fails() {
        let data = Data::new(Config::default(), EmployeeTable::from_records(sample_table()));
        let err = summary(&data, &Scope::employee("Nobody")).await.unwrap_err();
        assert!(err.to_string().contains("Nobody"));
    }
}
