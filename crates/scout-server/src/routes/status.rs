use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

async fn status_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn models_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "models": state.allowed_models }))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/models", get(models_handler))
        .with_state(state)
}
