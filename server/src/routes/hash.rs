use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::primitives::digest;
use crate::routes::{blocking, parse_body, JsonBody};
use crate::state::AppState;
use crate::store::SimulationRecord;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/hash/sha256", post(sha256_hash))
        .route("/api/hash/bcrypt", post(bcrypt_hash))
        .route("/api/hash/bcrypt/verify", post(bcrypt_verify))
}

#[derive(Debug, Deserialize)]
struct TextInput {
    text: String,
}

#[derive(Debug, Deserialize)]
struct BcryptVerifyInput {
    text: String,
    hashed_text: String,
}

async fn sha256_hash(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: TextInput = parse_body(payload)?;
    log::info!("sha256 hash");

    let hash = digest::sha256_hex(&input.text);
    state.persist(SimulationRecord::new("sha256", "hash", &input.text, &hash));

    Ok(Json(json!({
        "algorithm": "sha256",
        "action": "hash",
        "hash": hash,
        "input": input.text,
    })))
}

async fn bcrypt_hash(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: TextInput = parse_body(payload)?;
    log::info!("bcrypt hash (cost {})", state.tools.bcrypt_cost);

    let cost = state.tools.bcrypt_cost;
    let hash = blocking(move || digest::bcrypt_hash(&input.text, cost))
        .await?
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    // The plaintext never reaches the store.
    state.persist(SimulationRecord::new("bcrypt", "hash", "", &hash));

    Ok(Json(json!({
        "algorithm": "bcrypt",
        "action": "hash",
        "hash": hash,
        "note": "The hash embeds a random salt: hashing the same text twice gives different hashes.",
    })))
}

async fn bcrypt_verify(JsonBody(payload): JsonBody) -> Result<Json<Value>, ApiError> {
    let input: BcryptVerifyInput = parse_body(payload)?;
    log::info!("bcrypt verify");

    let matched = blocking(move || digest::bcrypt_verify(&input.text, &input.hashed_text)).await?;

    Ok(Json(json!({
        "algorithm": "bcrypt",
        "action": "verify",
        "match": matched,
        "note": "'match' is true when the text corresponds to the hash.",
    })))
}
