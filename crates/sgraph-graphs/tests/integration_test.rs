//! Integration tests for sgraph-graphs crate.
//!
//! These tests run the loader, aggregator and graph builder together and
//! check the invariants that hold for any table.

use proptest::prelude::*;
use sgraph_common::test_utils::property_testing::table_strategy;
use sgraph_common::test_utils::record_fixtures::{record, SAMPLE_CSV};
use sgraph_common::test_utils::{assert_approx_eq, init_test_logging};
use sgraph_common::{AchievementBand, HierarchyLevel, ProfitStatus, Scope};
use sgraph_config::ExportFormat;
use sgraph_graphs::{
    build_hierarchy_graph, classify_achievement, compute_row_metrics, group_by_level, summarize,
    Aggregator, RenderStyle, ReportManager, TableLoader,
};
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn test_cnf_grouping_example() {
    let records = vec![
        record(1, "A", ["C1", "S1", "D1", "R1", "M1"], 100.0, 10.0, 0.0, 0.0),
        record(2, "B", ["C1", "S2", "D2", "R2", "M2"], 200.0, 10.0, 0.0, 0.0),
    ];
    let groups = group_by_level(&records, HierarchyLevel::Cnf);
    assert_eq!(groups.len(), 1);
    assert_approx_eq(groups["C1"].sales, 300.0, 1e-9);
}

#[test]
fn test_zero_target_example() {
    let records = vec![record(1, "Z", ["C", "S", "D", "R", "M"], 900.0, 10.0, 0.0, 0.0)];
    let summary = summarize(&records, &Scope::employee("Z"));
    assert_approx_eq(summary.target_achievement_pct, 0.0, 0.0);
    assert_eq!(summary.band, AchievementBand::Critical);
}

#[test]
fn test_single_record_example() {
    let records = vec![record(1, "A", ["C1", "S1", "D1", "R1", "M1"], 1000.0, 200.0, 50.0, 800.0)];
    let metrics = compute_row_metrics(&records).unwrap()[0].metrics;
    assert_approx_eq(metrics.total_expenses, 250.0, 1e-9);
    assert_approx_eq(metrics.profit, 750.0, 1e-9);
    assert_eq!(metrics.profit_status, ProfitStatus::Profit);

    let summary = summarize(&records, &Scope::employee("A"));
    assert_approx_eq(summary.target_achievement_pct, 125.0, 1e-9);
    assert_eq!(classify_achievement(summary.target_achievement_pct), AchievementBand::High);
}

#[tokio::test]
async fn test_csv_to_exports_pipeline() {
    init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("sales.csv");
    std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

    let table = TableLoader::default().load(&csv_path).await.unwrap();
    let manager = ReportManager::new(
        Arc::new(table),
        Aggregator::default(),
        RenderStyle::default(),
        dir.path().join("reports"),
    );

    let scope = Scope::entity(HierarchyLevel::Super, "S1");
    let summary = manager.summary(&scope).unwrap();
    // Asha twice, Bilal and Dara pass through S1
    assert_eq!(summary.record_count, 4);
    assert_approx_eq(summary.total_sales, 1900.0, 1e-9);

    let dot_path = manager.export(&scope, ExportFormat::Dot).await.unwrap();
    let dot = std::fs::read_to_string(dot_path).unwrap();
    assert!(dot.contains("\"Super:S1\" -> \"Distributor:D1\";"));
    assert!(dot.contains("\"Super:S1\" -> \"Distributor:D2\";"));
    assert!(!dot.contains("Employee:Chen"));
}

proptest! {
    #[test]
    fn prop_row_metric_identities(records in table_strategy(20)) {
        let measured = compute_row_metrics(&records).unwrap();
        prop_assert_eq!(measured.len(), records.len());
        for m in &measured {
            let r = &m.record;
            prop_assert!((m.metrics.total_expenses - (r.salary + r.additional_expenses)).abs() < 1e-6);
            prop_assert!((m.metrics.profit - (r.sales - m.metrics.total_expenses)).abs() < 1e-6);
            prop_assert_eq!(m.metrics.profit_status == ProfitStatus::Profit, m.metrics.profit > 0.0);
        }
    }

    #[test]
    fn prop_group_sales_reconcile_with_total(records in table_strategy(30)) {
        let total = summarize(&records, &Scope::All).total_sales;
        for level in HierarchyLevel::ALL {
            let grouped: f64 = group_by_level(&records, level).values().map(|g| g.sales).sum();
            prop_assert!((grouped - total).abs() <= 1e-6 * total.max(1.0));
        }
    }

    #[test]
    fn prop_graph_has_no_duplicates_and_is_idempotent(records in table_strategy(30)) {
        let first = build_hierarchy_graph(&records, &Scope::All);
        let second = build_hierarchy_graph(&records, &Scope::All);
        prop_assert_eq!(&first, &second);

        let keys: HashSet<_> = first.nodes().map(|n| n.key.clone()).collect();
        prop_assert_eq!(keys.len(), first.node_count());
        let edges: HashSet<_> = first.edges().cloned().collect();
        prop_assert_eq!(edges.len(), first.edge_count());

        for edge in first.edges() {
            prop_assert_eq!(edge.from.level.child(), Some(edge.to.level));
            prop_assert!(keys.contains(&edge.from));
            prop_assert!(keys.contains(&edge.to));
        }
    }

    #[test]
    fn prop_achievement_is_zero_without_target(records in table_strategy(10)) {
        let mut records = records;
        for r in &mut records {
            r.target = 0.0;
        }
        let summary = summarize(&records, &Scope::All);
        prop_assert_eq!(summary.target_achievement_pct, 0.0);
        prop_assert_eq!(summary.band, AchievementBand::Critical);
    }
}
