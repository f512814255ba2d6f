use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use super::base::SearchProvider;

/// A mock search provider with canned results that records every query
#[derive(Clone)]
pub struct MockSearch {
    results: Option<Vec<Value>>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockSearch {
    pub fn new(results: Vec<Value>) -> Self {
        Self {
            results: Some(results),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A search provider whose every call fails
    pub fn failing() -> Self {
        Self {
            results: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        self.results
            .clone()
            .ok_or_else(|| anyhow!("Search API request failed: connection refused"))
    }
}
