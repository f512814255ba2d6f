use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::message::Message;
use crate::models::reply::Reply;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for hosted LLM providers (Groq, OpenAI, etc)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send the ordered conversation to `model` and wait for a single reply
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<(Reply, Usage)>;
}
