use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::{chat_client, complete_chat};
use crate::models::message::Message;
use crate::models::reply::Reply;

const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

pub const OPENAI_HOST: &str = "https://api.openai.com";

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = chat_client()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
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
