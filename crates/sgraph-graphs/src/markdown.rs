//! Markdown performance summaries.

use crate::aggregator::PerformanceSummary;
use crate::traits::GraphRenderer;
use crate::utils::RenderStyle;
use async_trait::async_trait;
use sgraph_common::{format_money, format_percent, Result};
use std::fmt::Write;

/// Renders a [`PerformanceSummary`] as a Markdown document.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Produces the Markdown text of `summary`.
    pub fn to_markdown(summary: &PerformanceSummary, style: &RenderStyle) -> String {
        let money = |amount: f64| format_money(amount, &style.currency_symbol);
        let mut out = String::new();
        let _ = writeln!(out, "# Performance Summary: {}\n", summary.scope);

        if summary.is_empty() {
            out.push_str("_No records matched this scope._\n");
            return out;
        }

        let rows = [
            ("Records", summary.record_count.to_string()),
            ("Total Sales", money(summary.total_sales)),
            ("Mean Salary", money(summary.mean_salary)),
            ("Additional Expenses", money(summary.additional_expenses)),
            ("Total Expenses", money(summary.total_expenses)),
            ("Profit", money(summary.profit)),
            ("Target", money(summary.target)),
            (
                "Target Achievement",
                format!(
                    "{} ({})",
                    format_percent(summary.target_achievement_pct),
                    summary.band
                ),
            ),
        ];

        out.push_str("| Metric | Value |\n|---|---:|\n");
        for (metric, value) in rows {
            let _ = writeln!(out, "| {metric} | {value} |");
        }

        let _ = writeln!(
            out,
            "\n**Status: {}** of {}",
            summary.profit_status,
            money(summary.profit.abs())
        );
        out
    }
}

#[async_trait]
impl GraphRenderer for MarkdownRenderer {
    type Data = PerformanceSummary;
    type Config = RenderStyle;

    async fn render(&self, data: Self::Data, config: Self::Config) -> Result<Vec<u8>> {
        Ok(Self::to_markdown(&data, &config).into_bytes())
    }

    fn name(&self) -> &'static str {
        "markdown"
    }

    fn description(&self) -> &'static str {
        "Markdown table of the performance summary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize;
    use sgraph_common::test_utils::record_fixtures::{sample_table, single_record};
    use sgraph_common::Scope;

    #[test]
    fn test_single_employee_markdown() {
        let summary = summarize(&[single_record()], &Scope::employee("A"));
        let text = MarkdownRenderer::to_markdown(&summary, &RenderStyle::default());

        assert!(text.starts_with("# Performance Summary: Employee: A\n"));
        assert!(text.contains("| Total Sales | ₹1,000.00 |"));
        assert!(text.contains("| Total Expenses | ₹250.00 |"));
        assert!(text.contains("| Profit | ₹750.00 |"));
        assert!(text.contains("| Target Achievement | 125.00% (High) |"));
        assert!(text.contains("**Status: Profit** of ₹750.00"));
    }

    #[test]
    fn test_loss_banner() {
        let summary = summarize(&sample_table(), &Scope::employee("Bilal"));
        let text = MarkdownRenderer::to_markdown(&summary, &RenderStyle {
            currency_symbol: "$".to_string(),
        });
        // 300 sales against 350 salary and 80 expenses
        assert!(text.contains("| Profit | -$130.00 |"));
        assert!(text.contains("**Status: Loss** of $130.00"));
        assert!(text.contains("30.00% (Low)"));
    }

    #[test]
    fn test_empty_scope_markdown() {
        let summary = summarize(&sample_table(), &Scope::employee("Nobody"));
        let text = MarkdownRenderer::to_markdown(&summary, &RenderStyle::default());
        assert!(text.contains("_No records matched this scope._"));
        assert!(!text.contains("| Metric |"));
    }
}
