use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use super::base::Usage;
use crate::models::message::Message;
use crate::models::reply::Reply;

/// Convert internal Message format to the OpenAI chat completion message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Convert an OpenAI compatible chat completion response into a Reply
///
/// A text `content` on the first choice is the structured reply. Anything else keeps the
/// message (or the whole body, if there is no message) as raw JSON.
pub fn openai_response_to_reply(response: Value) -> Result<Reply> {
    if let Some(error) = response.get("error") {
        return Err(anyhow!("Provider API error: {}", error));
    }

    let message = &response["choices"][0]["message"];
    if let Some(content) = message.get("content").and_then(|c| c.as_str()) {
        return Ok(Reply::structured(content));
    }

    if message.is_null() {
        Ok(Reply::Raw(response))
    } else {
        Ok(Reply::Raw(message.clone()))
    }
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

/// POST a chat completion payload with bearer auth and decode the JSON body
pub async fn post_chat_completion(
    client: &Client,
    url: &str,
    api_key: &str,
    payload: &Value,
) -> Result<Value> {
    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(payload)
        .send()
        .await?;

    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
            Err(anyhow!("Server error: {}", status))
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!("Request failed: {}\nBody: {}", status, body))
        }
    }
}

/// Client used by the chat completion providers
pub fn chat_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(600)) // 10 minutes timeout
        .build()?;
    Ok(client)
}

pub fn chat_completions_url(host: &str, path: &str) -> String {
    format!("{}/{}", host.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send one OpenAI style chat completion to `host` + `path` and split the body into the
/// reply and the reported usage
pub async fn complete_chat(
    client: &Client,
    host: &str,
    path: &str,
    api_key: &str,
    model: &str,
    messages: &[Message],
) -> Result<(Reply, Usage)> {
    let payload = json!({
        "model": model,
        "messages": messages_to_openai_spec(messages),
    });

    let url = chat_completions_url(host, path);
    tracing::debug!(model, messages = messages.len(), %url, "sending chat completion");
    let response = post_chat_completion(client, &url, api_key, &payload).await?;

    let usage = get_usage(&response);
    let reply = openai_response_to_reply(response)?;
    Ok((reply, usage))
}
