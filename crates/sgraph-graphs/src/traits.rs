//! Renderer trait shared by every export format.

use async_trait::async_trait;
use sgraph_common::Result;

/// Trait for renderers that turn a summary or graph into export bytes.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data: Send + 'static;

    /// The type of configuration this renderer uses.
    type Config: Send + 'static;

    /// Renders the data with the given configuration.
    async fn render(&self, data: Self::Data, config: Self::Config) -> Result<Vec<u8>>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;

    /// Gets the description of this renderer.
    fn description(&self) -> &'static str;
}
