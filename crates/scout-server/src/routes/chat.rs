use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use scout::{
    agent::{Agent, AgentRequest},
    errors::AgentError,
    models::query::Query,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model_name: String,
    #[serde(default)]
    messages: Option<Query>,
    #[serde(default)]
    allow_search: bool,
    #[serde(default)]
    system_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn error_reply<S: Into<String>>(status: StatusCode, error: S) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

impl From<ChatRequest> for AgentRequest {
    fn from(request: ChatRequest) -> Self {
        AgentRequest {
            model: request.model_name,
            query: request.messages,
            allow_search: request.allow_search,
            system_prompt: request.system_prompt,
        }
    }
}

// one request in, one reply out, non streaming
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorReply> {
    if !state.is_allowed_model(&request.model_name) {
        tracing::warn!(model = %request.model_name, "Rejected request for unknown model");
        return Err(error_reply(StatusCode::BAD_REQUEST, "Invalid model name"));
    }

    let agent = Agent::from_configs(state.provider_config, state.search_config).map_err(|e| {
        tracing::error!("Failed to create agent: {}", e);
        error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create agent")
    })?;

    match agent.respond(&request.into()).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(AgentError::InvalidInput(message)) => {
            Err(error_reply(StatusCode::BAD_REQUEST, message))
        }
        Err(e) => {
            tracing::error!("Error getting response from agent: {}", e);
            Err(error_reply(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .with_state(state)
}
