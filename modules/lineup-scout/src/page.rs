use anyhow::{Context, Result};
use async_trait::async_trait;

use stagehand_client::StagehandSession;

/// Seam over the live page session. Both strategies consume the page
/// through this trait so tests can substitute canned pages.
#[async_trait]
pub trait AgentPage: Send + Sync {
    /// Scroll to the bottom of the page and back to the top, forcing
    /// lazy-loaded lineup content to render. Owned by the page
    /// collaborator, not the strategies.
    async fn sweep(&self) -> Result<()>;

    /// Run a natural-language extraction shaped to a JSON schema.
    async fn extract(&self, instruction: &str, schema: &serde_json::Value)
        -> Result<serde_json::Value>;

    /// Rendered DOM snapshot of the current page.
    async fn content(&self) -> Result<String>;
}

#[async_trait]
impl AgentPage for StagehandSession {
    async fn sweep(&self) -> Result<()> {
        self.act("Scroll to the bottom of the page, then scroll back to the top.")
            .await
            .context("Page sweep failed")
    }

    async fn extract(
        &self,
        instruction: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        StagehandSession::extract(self, instruction, schema)
            .await
            .context("Stagehand extract failed")
    }

    async fn content(&self) -> Result<String> {
        StagehandSession::content(self)
            .await
            .context("Failed to fetch page content")
    }
}
