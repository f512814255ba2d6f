use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reply::value_to_text;

/// User input for a single request: one utterance or an ordered list of them
///
/// List entries arrive as arbitrary JSON from the HTTP surface, so they are kept as
/// values and converted to their string form during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    Text(String),
    Items(Vec<Value>),
}

impl Query {
    /// Canonical ordered sequence of non-blank utterances
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Query::Text(text) if text.trim().is_empty() => Vec::new(),
            Query::Text(text) => vec![text.clone()],
            Query::Items(items) => items
                .iter()
                .map(value_to_text)
                .filter(|item| !item.trim().is_empty())
                .collect(),
        }
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Query::Text(text.to_string())
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Query::Text(text)
    }
}

impl From<Vec<String>> for Query {
    fn from(items: Vec<String>) -> Self {
        Query::Items(items.into_iter().map(Value::String).collect())
    }
}

/// Normalize an optional query; an absent query has no utterances
pub fn normalize_query(query: Option<&Query>) -> Vec<String> {
    query.map(Query::normalize).unwrap_or_default()
}
