use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::query::{normalize_query, Query};
use crate::models::reply::value_to_text;
use crate::providers::base::Provider;
use crate::providers::configs::ProviderConfig;
use crate::providers::factory;
use crate::search::base::SearchProvider;
use crate::search::tavily::{TavilyConfig, TavilySearch};

/// Number of search results folded into a request
pub const SEARCH_MAX_RESULTS: usize = 2;

const SEARCH_PREAMBLE: &str = "Use the following web search results when responding:\n";

/// A single request to the agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub model: String,
    #[serde(default)]
    pub query: Option<Query>,
    #[serde(default)]
    pub allow_search: bool,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AgentRequest {
    pub fn new<S: Into<String>, Q: Into<Query>>(model: S, query: Q) -> Self {
        Self {
            model: model.into(),
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, allow_search: bool) -> Self {
        self.allow_search = allow_search;
        self
    }

    pub fn with_system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Agent pairs an LLM provider with an optional web search capability
pub struct Agent {
    provider: Box<dyn Provider>,
    search: Option<Box<dyn SearchProvider>>,
}

impl Agent {
    /// Create a new Agent with the specified provider and no search capability
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            search: None,
        }
    }

    pub fn with_search(mut self, search: Box<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Build fresh provider and search clients from configuration
    pub fn from_configs(
        provider_config: ProviderConfig,
        search_config: Option<TavilyConfig>,
    ) -> AgentResult<Self> {
        let agent = Self::new(factory::get_provider(provider_config)?);
        match search_config {
            Some(config) => Ok(agent.with_search(Box::new(TavilySearch::new(config)?))),
            None => Ok(agent),
        }
    }

    /// Assemble the ordered conversation for a request
    ///
    /// The order is always: system prompt, search results, then every user utterance.
    pub async fn build_messages(&self, request: &AgentRequest) -> AgentResult<Vec<Message>> {
        let user_messages = normalize_query(request.query.as_ref());
        let Some(last_query) = user_messages.last() else {
            return Err(AgentError::InvalidInput(
                "No user messages provided to agent".to_string(),
            ));
        };

        let mut messages = Vec::with_capacity(user_messages.len() + 2);

        if let Some(system_prompt) = request.system_prompt.as_deref() {
            if !system_prompt.is_empty() {
                messages.push(Message::system(system_prompt));
            }
        }

        if request.allow_search {
            if let Some(note) = self.build_search_note(last_query).await {
                messages.push(Message::system(format!("{}{}", SEARCH_PREAMBLE, note)));
            }
        }

        messages.extend(user_messages.into_iter().map(Message::user));
        Ok(messages)
    }

    /// Answer a request with a single reply from the provider
    pub async fn respond(&self, request: &AgentRequest) -> AgentResult<String> {
        let messages = self.build_messages(request).await?;

        debug!(model = %request.model, messages = messages.len(), "dispatching request");
        let (reply, usage) = self.provider.complete(&request.model, &messages).await?;
        debug!(?usage, "received reply");

        Ok(reply.into_text())
    }

    /// Search failures never fail the request, they only drop the augmentation
    async fn build_search_note(&self, query: &str) -> Option<String> {
        let Some(search) = self.search.as_ref() else {
            warn!("Web search requested but no search provider is configured");
            return None;
        };

        match search.search(query, SEARCH_MAX_RESULTS).await {
            Ok(results) => render_search_results(&results),
            Err(error) => {
                warn!("Web search failed: {}", error);
                None
            }
        }
    }
}

/// Render search results as a numbered text block, or None when there are no results
pub fn render_search_results(results: &[Value]) -> Option<String> {
    if results.is_empty() {
        return None;
    }

    let snippets: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(index, result)| render_result(index + 1, result))
        .collect();

    Some(snippets.join("\n\n"))
}

fn render_result(index: usize, result: &Value) -> String {
    let Value::Object(fields) = result else {
        return format!("{}. {}", index, value_to_text(result));
    };

    let field = |key: &str| {
        fields
            .get(key)
            .filter(|value| !is_blank(value))
            .map(value_to_text)
    };

    let title = field("title")
        .or_else(|| field("url"))
        .unwrap_or_else(|| format!("Result {}", index));
    let content = field("content")
        .or_else(|| field("snippet"))
        .unwrap_or_default();

    format!("{}. {}\n{}", index, title, content).trim().to_string()
}

// false, zero and empty containers fall through like a missing field
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
