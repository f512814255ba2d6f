use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::base::SearchProvider;

pub const TAVILY_HOST: &str = "https://api.tavily.com";

#[derive(Debug, Clone)]
pub struct TavilyConfig {
    pub host: String,
    pub api_key: String,
}

impl TavilyConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: TAVILY_HOST.to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Web search through the Tavily search API
pub struct TavilySearch {
    client: Client,
    config: TavilyConfig,
}

impl TavilySearch {
    pub fn new(config: TavilyConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Value>> {
        debug!(target: "web_search", query = %query, max_results, "Performing Tavily search");

        let url = format!("{}/search", self.config.host.trim_end_matches('/'));
        let payload = json!({
            "api_key": self.config.api_key,
            "query": query,
            "max_results": max_results,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| anyhow!("Search API request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Search API returned status: {}", status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse search response: {}", e))?;

        let mut results = extract_results(body)?;
        results.truncate(max_results);
        Ok(results)
    }
}

/// Pull the result list out of a search response
///
/// Accepts `{"results": [...]}`, a bare list, and a `(results, metadata)` pair serialized
/// as a two element list whose first element is the result list. A bare list that merely
/// starts with an array is kept whole.
pub fn extract_results(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Object(mut object) => match object.remove("results") {
            Some(Value::Array(results)) => Ok(results),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(anyhow!("Unexpected search results field: {}", other)),
        },
        Value::Array(items) => {
            let is_pair = matches!(
                items.as_slice(),
                [Value::Array(_), metadata] if !is_result_record(metadata)
            );
            match items.first() {
                Some(Value::Array(results)) if is_pair => Ok(results.clone()),
                _ => Ok(items),
            }
        }
        Value::Null => Ok(Vec::new()),
        other => Err(anyhow!("Unexpected search response: {}", other)),
    }
}

fn is_result_record(value: &Value) -> bool {
    value.as_object().map_or(false, |object| {
        ["title", "url", "content", "snippet"]
            .iter()
            .any(|key| object.contains_key(*key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn _setup_mock_server(response: ResponseTemplate) -> (MockServer, TavilySearch) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_partial_json(json!({"api_key": "tvly-test", "max_results": 2})))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let search = TavilySearch::new(TavilyConfig {
            host: mock_server.uri(),
            api_key: "tvly-test".to_string(),
        })
        .unwrap();
        (mock_server, search)
    }

    #[tokio::test]
    async fn test_search_returns_results() -> Result<()> {
        let body = json!({
            "query": "rust release",
            "results": [
                {"title": "Rust 1.80", "url": "https://blog.rust-lang.org", "content": "Released."},
                {"title": "Changelog", "url": "https://github.com/rust-lang/rust", "content": "Notes."}
            ],
            "response_time": 0.4
        });
        let (_server, search) =
            _setup_mock_server(ResponseTemplate::new(200).set_body_json(body)).await;

        let results = search.search("rust release", 2).await?;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "Rust 1.80");
        Ok(())
    }

    #[tokio::test]
    async fn test_search_truncates_to_max_results() -> Result<()> {
        let body = json!({"results": [{"title": "a"}, {"title": "b"}, {"title": "c"}]});
        let (_server, search) =
            _setup_mock_server(ResponseTemplate::new(200).set_body_json(body)).await;

        assert_eq!(search.search("letters", 2).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let (_server, search) = _setup_mock_server(ResponseTemplate::new(432)).await;

        let err = search.search("anything", 2).await.unwrap_err();
        assert!(err.to_string().starts_with("Search API returned status: 432"));
    }

    #[tokio::test]
    async fn test_search_invalid_json() {
        let (_server, search) =
            _setup_mock_server(ResponseTemplate::new(200).set_body_string("<html>")).await;

        let err = search.search("anything", 2).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse search response"));
    }

    #[test]
    fn test_extract_results_shapes() -> Result<()> {
        let entry = json!({"title": "A", "content": "x"});

        assert_eq!(extract_results(json!({"results": [entry.clone()]}))?, vec![entry.clone()]);
        assert_eq!(extract_results(json!([entry.clone()]))?, vec![entry.clone()]);
        assert_eq!(
            extract_results(json!([[entry.clone()], {"response_time": 0.2}]))?,
            vec![entry]
        );
        assert!(extract_results(json!({"answer": null}))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_extract_results_keeps_list_starting_with_array() -> Result<()> {
        let record = json!({"title": "B"});

        assert_eq!(
            extract_results(json!([["x", "y"], record.clone()]))?,
            vec![json!(["x", "y"]), record.clone()]
        );
        assert_eq!(
            extract_results(json!([["x"], record.clone(), {"response_time": 0.2}]))?,
            vec![json!(["x"]), record, json!({"response_time": 0.2})]
        );
        assert_eq!(extract_results(json!([["x"]]))?, vec![json!(["x"])]);
        assert!(extract_results(Value::Null)?.is_empty());
        assert!(extract_results(json!("rate limited")).is_err());
        Ok(())
    }
}
