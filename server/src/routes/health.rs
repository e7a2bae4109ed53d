use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(api_health))
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Bienvenue sur l'API CryptoLab!" }))
}

async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "persistence": if state.store.is_enabled() { "enabled" } else { "disabled" },
    }))
}
