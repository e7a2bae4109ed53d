pub mod asymmetric;
pub mod classical;
pub mod hash;
pub mod health;
pub mod history;
pub mod modern;
pub mod simulate;

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderValue;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn app(state: Arc<AppState>, origins: &[String]) -> Router {
    Router::new()
        .merge(health::router())
        .merge(simulate::router())
        .merge(classical::router())
        .merge(modern::router())
        .merge(hash::router())
        .merge(asymmetric::router())
        .merge(history::router())
        .layer(cors(origins))
        .with_state(state)
}

/// Listed origins only, with credentials.
pub fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// A JSON request body. Malformed JSON or a missing content type is a 422
/// with a `detail` message, like any other payload error.
pub(crate) struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// Typed view of a JSON body; missing or mistyped fields are a 422.
pub(crate) fn parse_body<T: DeserializeOwned>(payload: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(payload)?)
}

/// Runs CPU-heavy library calls (bcrypt, RSA key generation) off the async workers.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}
