//! List command: the entities available for selection at each level.

use crate::framework::{CommandOutput, Context};
use sgraph_common::{format_money, HierarchyLevel};
use std::fmt::Write;

/// Lists entity names with record counts and sales, for one level or all of them.
pub fn list(ctx: Context<'_>, level: Option<HierarchyLevel>) -> CommandOutput {
    let symbol = &ctx.config.report.currency_symbol;
    let levels = level.map_or_else(|| HierarchyLevel::ALL.to_vec(), |level| vec![level]);

    let mut out = String::new();
    for level in levels {
        let totals = ctx.manager.level_totals(level);
        let _ = writeln!(out, "{level} ({})", totals.len());
        let width = totals.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
        for total in totals {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>4} records  {}",
                total.name,
                total.record_count,
                format_money(total.sales, symbol),
            );
        }
    }
    CommandOutput::Text(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Data;
    use sgraph_config::Config;
    use sgraph_graphs::EmployeeTable;
    use sgraph_common::test_utils::record_fixtures::sample_table;

    #[test]
    fn test_list_one_level() {
        let data = Data::new(Config::default(), EmployeeTable::from_records(sample_table()));
        let CommandOutput::Text(text) = list(&data, Some(HierarchyLevel::Cnf)) else {
            panic!("expected text output");
        };
        assert!(text.starts_with("CNF (2)\n"));
        assert!(text.contains("  C1     3 records  ₹1,800.00"));
        assert!(text.contains("  C2     2 records  ₹2,100.00"));
    }

    #[test]
    fn test_list_all_levels() {
        let data = Data::new(Config::default(), EmployeeTable::from_records(sample_table()));
        let CommandOutput::Text(text) = list(&data, None) else {
            panic!("expected text output");
        };
        assert!(text.contains("Employee (4)"));
        assert!(text.contains("ASM (4)"));
    }
}
