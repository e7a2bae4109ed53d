use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::primitives::rsa_oaep;
use crate::routes::{blocking, parse_body, JsonBody};
use crate::state::AppState;

// Key material and RSA payloads are never persisted.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/asymmetric/rsa/generate-keys", get(generate_keys))
        .route("/api/asymmetric/rsa/encrypt", post(rsa_encrypt))
        .route("/api/asymmetric/rsa/decrypt", post(rsa_decrypt))
}

const RSA_OAEP: &str = "rsa-oaep";

#[derive(Debug, Deserialize)]
struct RsaEncryptInput {
    text: String,
    public_key: String,
}

#[derive(Debug, Deserialize)]
struct RsaDecryptInput {
    cipher_hex: String,
    private_key: String,
}

async fn generate_keys(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let bits = state.tools.rsa_bits;
    log::info!("rsa generate {bits}-bit key pair");

    let pair = blocking(move || rsa_oaep::generate_keys(bits))
        .await?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "algorithm": format!("rsa-{bits}"),
        "private_key": pair.private_key,
        "public_key": pair.public_key,
    })))
}

async fn rsa_encrypt(JsonBody(payload): JsonBody) -> Result<Json<Value>, ApiError> {
    let input: RsaEncryptInput = parse_body(payload)?;
    log::info!("{RSA_OAEP} encrypt");

    Ok(Json(match rsa_oaep::encrypt(&input.text, &input.public_key) {
        Ok(cipher_hex) => json!({
            "algorithm": RSA_OAEP,
            "action": "encrypt",
            "success": true,
            "cipher_hex": cipher_hex,
        }),
        Err(e) => json!({
            "algorithm": RSA_OAEP,
            "action": "encrypt",
            "success": false,
            "error": e.to_string(),
        }),
    }))
}

async fn rsa_decrypt(JsonBody(payload): JsonBody) -> Result<Json<Value>, ApiError> {
    let input: RsaDecryptInput = parse_body(payload)?;
    log::info!("{RSA_OAEP} decrypt");

    let result = blocking(move || rsa_oaep::decrypt(&input.cipher_hex, &input.private_key)).await?;
    Ok(Json(match result {
        Ok(plain) => json!({
            "algorithm": RSA_OAEP,
            "action": "decrypt",
            "success": true,
            "plain": plain,
        }),
        Err(e) => json!({
            "algorithm": RSA_OAEP,
            "action": "decrypt",
            "success": false,
            "error": e.to_string(),
        }),
    }))
}
