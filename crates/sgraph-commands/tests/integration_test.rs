//! Integration tests for sgraph-commands crate.
//!
//! These tests load a table from disk through the configuration and run
//! the commands against it.

use sgraph_commands::{about, config, graph, list, report, summary, CommandOutput, Data, GraphFormat};
use sgraph_common::test_utils::record_fixtures::SAMPLE_CSV;
use sgraph_common::test_utils::{create_temp_file_with, init_test_logging};
use sgraph_common::{HierarchyLevel, SGraphError, Scope};
use sgraph_config::{Config, ExportFormat};

fn config_for(csv: &tempfile::NamedTempFile) -> Config {
    let mut config = Config::default();
    config.data.csv_path = csv.path().to_path_buf();
    config
}

#[tokio::test]
async fn test_commands_over_loaded_table() {
    init_test_logging();
    let csv = create_temp_file_with(".csv", SAMPLE_CSV);
    let data = Data::load(config_for(&csv)).await.unwrap();

    let about = about::about(&data).to_string();
    assert!(about.contains("(5 records)"));

    let listing = list::list(&data, Some(HierarchyLevel::Rsm)).to_string();
    assert!(listing.starts_with("RSM (3)"));

    let text = summary::summary(&data, &Scope::employee("Asha"))
        .await
        .unwrap()
        .to_string();
    assert!(text.contains("| Target Achievement | 150.00% (High) |"));

    let dot = graph::graph(&data, &Scope::All, GraphFormat::Dot, None)
        .await
        .unwrap()
        .to_string();
    assert!(dot.starts_with("digraph hierarchy {"));

    let dir = tempfile::tempdir().unwrap();
    let written = report::report(
        &data,
        &Scope::entity(HierarchyLevel::Cnf, "C2"),
        &[ExportFormat::Markdown],
        Some(dir.path().to_path_buf()),
    )
    .await
    .unwrap();
    assert_eq!(
        written,
        CommandOutput::Written(vec![dir.path().join("cnf_c2_sales_report.md")])
    );
}

#[tokio::test]
async fn test_missing_table_is_io_error() {
    let mut config = Config::default();
    config.data.csv_path = "definitely/not/here.csv".into();
    assert!(matches!(Data::load(config).await, Err(SGraphError::Io(_))));
}

#[test]
fn test_config_view_without_table() {
    let output = config::view(&Config::default()).unwrap().to_string();
    assert!(output.contains("currency_symbol"));
    assert!(output.contains("expense_policy: mean_salary"));
}
