//! Graph command: the hierarchy graph of a scope as DOT or JSON.

use crate::framework::{CommandOutput, Context, Error};
use sgraph_common::Scope;
use sgraph_graphs::{DotRenderer, RenderStyle};
use std::path::PathBuf;
use tracing::info;

/// Output format of the graph command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Graphviz DOT.
    #[default]
    Dot,
    /// The serialized graph structure.
    Json,
}

/// Builds the hierarchy graph of `scope` and prints it or writes it to `output`.
pub async fn graph(
    ctx: Context<'_>,
    scope: &Scope,
    format: GraphFormat,
    output: Option<PathBuf>,
) -> Result<CommandOutput, Error> {
    let graph = ctx.manager.graph(scope)?;
    if !graph.skipped().is_empty() {
        info!(
            skipped = graph.skipped().len(),
            "some records were left out of the graph"
        );
    }

    let text = match format {
        GraphFormat::Dot => DotRenderer::to_dot(&graph, &RenderStyle::from_config(&ctx.config)),
        GraphFormat::Json => serde_json::to_string_pretty(&graph)? + "\n",
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, text).await?;
            Ok(CommandOutput::Written(vec![path]))
        }
        None => Ok(CommandOutput::Text(text)),
    }
}
