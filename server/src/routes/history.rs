use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::routes::blocking;
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 200;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/history", get(history))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let store = Arc::clone(&state.store);

    let results = blocking(move || store.recent(limit))
        .await?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "count": results.len(),
        "results": results,
    })))
}
