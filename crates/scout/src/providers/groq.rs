use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::base::{Provider, Usage};
use super::configs::GroqProviderConfig;
use super::utils::{chat_client, complete_chat};
use crate::models::message::Message;
use crate::models::reply::Reply;

const CHAT_COMPLETIONS_PATH: &str = "openai/v1/chat/completions";

pub const GROQ_HOST: &str = "https://api.groq.com";
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq serves an OpenAI compatible chat completions API under `/openai`
pub struct GroqProvider {
    client: Client,
    config: GroqProviderConfig,
}

impl GroqProvider {
    pub fn new(config: GroqProviderConfig) -> Result<Self> {
        let client = chat_client()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<(Reply, Usage)> {
        complete_chat(
            &self.client,
            &self.config.host,
            CHAT_COMPLETIONS_PATH,
            &self.config.api_key,
            model,
            messages,
        )
        .await
    }
}
