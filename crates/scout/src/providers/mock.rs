use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::message::Message;
use crate::models::reply::Reply;
use crate::providers::base::{Provider, Usage};

/// A mock provider that returns a pre-configured reply and records what it was sent
#[derive(Clone)]
pub struct MockProvider {
    reply: Option<Reply>,
    calls: Arc<Mutex<Vec<(String, Vec<Message>)>>>,
}

impl MockProvider {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Message>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<(Reply, Usage)> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        match &self.reply {
            Some(reply) => Ok((reply.clone(), Usage::default())),
            None => Err(anyhow!("Server error: 503 Service Unavailable")),
        }
    }
}
