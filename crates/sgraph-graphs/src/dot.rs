//! Graphviz DOT rendering of a hierarchy graph.

use crate::hierarchy::{GraphNode, HierarchyGraph, NodeKey};
use crate::traits::GraphRenderer;
use crate::utils::{GraphUtils, RenderStyle};
use async_trait::async_trait;
use sgraph_common::{format_money, format_percent, HierarchyLevel, Result};
use std::fmt::Write;

/// Renders a [`HierarchyGraph`] as a top-to-bottom DOT digraph.
pub struct DotRenderer;

impl DotRenderer {
    /// Produces the DOT source of `graph`.
    pub fn to_dot(graph: &HierarchyGraph, style: &RenderStyle) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph hierarchy {{");
        let _ = writeln!(
            out,
            "    label=\"{}\";",
            GraphUtils::escape_dot(&format!("Sales hierarchy: {}", graph.scope()))
        );
        out.push_str("    labelloc=t;\n    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];\n");
        for skipped in graph.skipped() {
            let _ = writeln!(
                out,
                "    // skipped {}: {}",
                GraphUtils::escape_dot(&skipped.employee_name),
                skipped.error()
            );
        }

        for node in graph.nodes() {
            let _ = writeln!(
                out,
                "    {} [{}];",
                node_id(&node.key),
                node_attributes(node, style)
            );
        }
        if graph.edge_count() > 0 {
            out.push('\n');
        }
        for edge in graph.edges() {
            let _ = writeln!(out, "    {} -> {};", node_id(&edge.from), node_id(&edge.to));
        }
        out.push_str("}\n");
        out
    }
}

fn node_id(key: &NodeKey) -> String {
    format!("\"{}\"", GraphUtils::escape_dot(&key.to_string()))
}

fn node_attributes(node: &GraphNode, style: &RenderStyle) -> String {
    let symbol = style.currency_symbol.as_str();
    let mut label = format!(
        "{}\n{}\nSales: {}",
        node.level(),
        node.name(),
        format_money(node.sales, symbol)
    );

    match (&node.summary, node.level()) {
        (Some(summary), HierarchyLevel::Employee) => {
            let _ = write!(
                label,
                "\nProfit: {}\nTarget: {} ({})",
                format_money(summary.profit, symbol),
                format_percent(summary.target_achievement_pct),
                summary.band
            );
            format!(
                "label=\"{}\", fillcolor=\"{}\", color=\"{}\", penwidth=2",
                GraphUtils::escape_dot(&label),
                GraphUtils::status_fill(summary.profit_status),
                GraphUtils::band_hex(summary.band)
            )
        }
        (_, level) => format!(
            "label=\"{}\", fillcolor=\"{}\"",
            GraphUtils::escape_dot(&label),
            GraphUtils::level_fill(level)
        ),
    }
}

#[async_trait]
impl GraphRenderer for DotRenderer {
    type Data = HierarchyGraph;
    type Config = RenderStyle;

    async fn render(&self, data: Self::Data, config: Self::Config) -> Result<Vec<u8>> {
        Ok(Self::to_dot(&data, &config).into_bytes())
    }

    fn name(&self) -> &'static str {
        "dot"
    }

    fn description(&self) -> &'static str {
        "Graphviz DOT diagram of the reporting hierarchy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_hierarchy_graph;
    use sgraph_common::test_utils::record_fixtures::{record, single_record};
    use sgraph_common::Scope;

    #[test]
    fn test_single_record_dot() {
        let graph = build_hierarchy_graph(&[single_record()], &Scope::All);
        let dot = DotRenderer::to_dot(&graph, &RenderStyle::default());

        assert!(dot.starts_with("digraph hierarchy {"));
        assert!(dot.contains("rankdir=TB;"));
        assert!(dot.contains("\"CNF:C1\" [label=\"CNF\\nC1\\nSales: ₹1,000.00\", fillcolor=\"lightblue\"];"));
        assert!(dot.contains("\"CNF:C1\" -> \"Super:S1\";"));
        assert!(dot.contains("\"ASM:M1\" -> \"Employee:A\";"));
        assert!(dot.contains("Target: 125.00% (High)"));
        assert!(dot.contains("fillcolor=\"lightgreen\", color=\"#2e7d32\""));
        assert_eq!(dot.matches(" -> ").count(), 5);
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_loss_employee_is_coral() {
        let records = vec![record(1, "L", ["C", "S", "D", "R", "M"], 10.0, 100.0, 5.0, 100.0)];
        let graph = build_hierarchy_graph(&records, &Scope::All);
        let dot = DotRenderer::to_dot(&graph, &RenderStyle {
            currency_symbol: "$".to_string(),
        });
        assert!(dot.contains("Profit: -$95.00"));
        assert!(dot.contains("fillcolor=\"lightcoral\", color=\"#c62828\""));
    }

    #[test]
    fn test_names_are_escaped() {
        let records = vec![record(1, "Quote \"Q\"", ["C", "S", "D", "R", "M"], 1.0, 0.0, 0.0, 1.0)];
        let graph = build_hierarchy_graph(&records, &Scope::All);
        let dot = DotRenderer::to_dot(&graph, &RenderStyle::default());
        assert!(dot.contains("\"Employee:Quote \\\"Q\\\"\""));
    }

    #[test]
    fn test_skipped_records_are_noted() {
        let records = vec![
            single_record(),
            record(4, "B", ["C1", "S1", "D1", "", "M1"], 5.0, 1.0, 1.0, 1.0),
        ];
        let graph = build_hierarchy_graph(&records, &Scope::All);
        let dot = DotRenderer::to_dot(&graph, &RenderStyle::default());
        assert!(dot.contains("    // skipped B: row 4 has no value for hierarchy level RSM\n"));
        assert!(!dot.contains("Employee:B"));
    }

    #[tokio::test]
    async fn test_renderer_trait() {
        let graph = build_hierarchy_graph(&[single_record()], &Scope::All);
        let bytes = DotRenderer
            .render(graph, RenderStyle::default())
            .await
            .unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("digraph"));
        assert_eq!(DotRenderer.name(), "dot");
    }
}
