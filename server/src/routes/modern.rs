use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::primitives::{aead, des_cbc, ToolError};
use crate::routes::{parse_body, JsonBody};
use crate::state::AppState;
use crate::store::SimulationRecord;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/modern/aes/encrypt", post(aes_encrypt))
        .route("/api/modern/aes/decrypt", post(aes_decrypt))
        .route("/api/modern/des/encrypt", post(des_encrypt))
        .route("/api/modern/des/decrypt", post(des_decrypt))
}

const AES_GCM: &str = "aes-gcm";
const DES_CBC: &str = "des-cbc";

#[derive(Debug, Deserialize)]
struct EncryptInput {
    text: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct AesDecryptInput {
    cipher_hex: String,
    key: String,
    nonce_hex: String,
    tag_hex: String,
}

#[derive(Debug, Deserialize)]
struct DesDecryptInput {
    cipher_hex: String,
    key: String,
    iv_hex: String,
}

/// Decryption failures are data, not transport errors.
fn decrypt_response(
    state: &AppState,
    algorithm: &str,
    cipher_hex: &str,
    result: Result<String, ToolError>,
) -> Json<Value> {
    match result {
        Ok(plain) => {
            state.persist(SimulationRecord::new(algorithm, "decrypt", cipher_hex, &plain));
            Json(json!({
                "algorithm": algorithm,
                "action": "decrypt",
                "success": true,
                "plain": plain,
            }))
        }
        Err(e) => {
            log::info!("{algorithm} decrypt rejected: {e}");
            Json(json!({
                "algorithm": algorithm,
                "action": "decrypt",
                "success": false,
                "error": e.to_string(),
            }))
        }
    }
}

async fn aes_encrypt(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: EncryptInput = parse_body(payload)?;
    log::info!("{AES_GCM} encrypt");

    let sealed = aead::encrypt(&input.text, &input.key).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.persist(SimulationRecord::new(AES_GCM, "encrypt", &input.text, &sealed.cipher_hex));

    Ok(Json(json!({
        "algorithm": AES_GCM,
        "action": "encrypt",
        "cipher_hex": sealed.cipher_hex,
        "nonce_hex": sealed.nonce_hex,
        "tag_hex": sealed.tag_hex,
    })))
}

async fn aes_decrypt(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: AesDecryptInput = parse_body(payload)?;
    log::info!("{AES_GCM} decrypt");

    let result = aead::decrypt(&input.cipher_hex, &input.key, &input.nonce_hex, &input.tag_hex);
    Ok(decrypt_response(&state, AES_GCM, &input.cipher_hex, result))
}

async fn des_encrypt(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: EncryptInput = parse_body(payload)?;
    log::info!("{DES_CBC} encrypt");

    let sealed = des_cbc::encrypt(&input.text, &input.key).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.persist(SimulationRecord::new(DES_CBC, "encrypt", &input.text, &sealed.cipher_hex));

    Ok(Json(json!({
        "algorithm": DES_CBC,
        "action": "encrypt",
        "cipher_hex": sealed.cipher_hex,
        "iv_hex": sealed.iv_hex,
    })))
}

async fn des_decrypt(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let input: DesDecryptInput = parse_body(payload)?;
    log::info!("{DES_CBC} decrypt");

    let result = des_cbc::decrypt(&input.cipher_hex, &input.key, &input.iv_hex);
    Ok(decrypt_response(&state, DES_CBC, &input.cipher_hex, result))
}
