//! JSON export bundling a summary with its hierarchy graph.

use crate::aggregator::PerformanceSummary;
use crate::hierarchy::HierarchyGraph;
use crate::traits::GraphRenderer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sgraph_common::Result;

/// Everything a downstream renderer needs for one scope.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Currency symbol amounts are denominated in.
    pub currency_symbol: String,
    /// Performance summary of the scope.
    pub summary: PerformanceSummary,
    /// Hierarchy graph of the scope.
    pub graph: HierarchyGraph,
}

/// Serializes [`ReportBundle`]s as pretty-printed JSON.
pub struct JsonRenderer;

#[async_trait]
impl GraphRenderer for JsonRenderer {
    type Data = ReportBundle;
    type Config = ();

    async fn render(&self, data: Self::Data, _config: Self::Config) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(&data)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "JSON document with the performance summary and hierarchy graph"
    }
}
