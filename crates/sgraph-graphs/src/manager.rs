//! Report manager tying the loaded table, aggregation and renderers together.

use crate::aggregator::{group_by_level, Aggregator, LevelAggregate, PerformanceSummary};
use crate::dot::DotRenderer;
use crate::hierarchy::{HierarchyGraph, HierarchyGraphBuilder};
use crate::json::{JsonRenderer, ReportBundle};
use crate::loader::EmployeeTable;
use crate::markdown::MarkdownRenderer;
use crate::report_card::{ReportCardConfig, ReportCardRenderer};
use crate::traits::GraphRenderer;
use crate::utils::{GraphUtils, RenderStyle};
use chrono::Utc;
use futures::future::try_join_all;
use sgraph_common::{HierarchyLevel, Result, SGraphError, Scope};
use sgraph_config::{Config, ExportFormat};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Answers summary, graph and export queries over one loaded table.
#[derive(Debug, Clone)]
pub struct ReportManager {
    table: Arc<EmployeeTable>,
    aggregator: Aggregator,
    style: RenderStyle,
    output_dir: PathBuf,
}

impl ReportManager {
    /// Creates a manager with explicit settings.
    pub fn new(
        table: Arc<EmployeeTable>,
        aggregator: Aggregator,
        style: RenderStyle,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            table,
            aggregator,
            style,
            output_dir: output_dir.into(),
        }
    }

    /// Creates a manager from the loaded configuration.
    pub fn from_config(table: Arc<EmployeeTable>, config: &Config) -> Self {
        Self::new(
            table,
            Aggregator::from_config(config),
            RenderStyle::from_config(config),
            config.report.output_dir.clone(),
        )
    }

    /// Redirects exports to another directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// The loaded table.
    pub fn table(&self) -> &EmployeeTable {
        &self.table
    }

    /// The aggregator in use.
    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }

    /// Directory exports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fails with [`SGraphError::UnknownEntity`] when a named scope matches no record.
    pub fn resolve_scope(&self, scope: &Scope) -> Result<()> {
        let (level, name) = match scope {
            Scope::All => return Ok(()),
            Scope::Employee { name } => (HierarchyLevel::Employee, name),
            Scope::Entity { level, name } => (*level, name),
        };
        if self.table.contains(level, name) {
            Ok(())
        } else {
            Err(SGraphError::UnknownEntity {
                level,
                name: name.clone(),
            })
        }
    }

    /// Per-entity totals at `level` across the whole table.
    pub fn level_totals(&self, level: HierarchyLevel) -> Vec<LevelAggregate> {
        group_by_level(self.table.records(), level)
            .into_values()
            .collect()
    }

    /// Performance summary of `scope`.
    pub fn summary(&self, scope: &Scope) -> Result<PerformanceSummary> {
        self.resolve_scope(scope)?;
        Ok(self.aggregator.summarize(self.table.records(), scope))
    }

    /// Hierarchy graph of `scope`.
    pub fn graph(&self, scope: &Scope) -> Result<HierarchyGraph> {
        self.resolve_scope(scope)?;
        Ok(HierarchyGraphBuilder::new(self.aggregator).build(self.table.records(), scope))
    }

    /// Renders `scope` in `format`.
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn render(&self, scope: &Scope, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Markdown => {
                MarkdownRenderer
                    .render(self.summary(scope)?, self.style.clone())
                    .await
            }
            ExportFormat::Png => {
                let config = ReportCardConfig {
                    style: self.style.clone(),
                    thresholds: self.aggregator.thresholds(),
                };
                ReportCardRenderer.render(self.summary(scope)?, config).await
            }
            ExportFormat::Json => {
                let bundle = ReportBundle {
                    generated_at: Utc::now(),
                    currency_symbol: self.style.currency_symbol.clone(),
                    summary: self.summary(scope)?,
                    graph: self.graph(scope)?,
                };
                JsonRenderer.render(bundle, ()).await
            }
            ExportFormat::Dot => DotRenderer.render(self.graph(scope)?, self.style.clone()).await,
        }
    }

    /// File an export of `scope` in `format` is written to.
    pub fn export_path(&self, scope: &Scope, format: ExportFormat) -> PathBuf {
        self.output_dir.join(format!(
            "{}_sales_report.{}",
            GraphUtils::scope_slug(scope),
            format.extension()
        ))
    }

    /// Renders `scope` and writes it under the output directory.
    pub async fn export(&self, scope: &Scope, format: ExportFormat) -> Result<PathBuf> {
        let bytes = self.render(scope, format).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.export_path(scope, format);
        tokio::fs::write(&path, &bytes).await?;
        info!(path = %path.display(), %format, bytes = bytes.len(), "report written");
        Ok(path)
    }

    /// Writes several formats of `scope` concurrently.
    pub async fn export_all(&self, scope: &Scope, formats: &[ExportFormat]) -> Result<Vec<PathBuf>> {
        try_join_all(formats.iter().map(|format| self.export(scope, *format))).await
    }
}
