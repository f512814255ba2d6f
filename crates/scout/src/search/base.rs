use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Base trait for web search APIs
///
/// Results are returned as raw JSON entries. Callers should expect objects carrying some of
/// `title`, `url`, `content` and `snippet`, but must cope with anything else.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Value>>;
}
