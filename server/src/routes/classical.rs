use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use classical::{Caesar, Playfair, RailFence, Vigenere};
use lab_core::{CipherAlgorithm, Direction};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::routes::{parse_body, JsonBody};
use crate::simulation::{Algorithm, KeyTextInput, ShiftTextInput};
use crate::state::AppState;
use crate::store::SimulationRecord;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/classical/{algo}/{action}", post(classical_action))
}

fn parse_action(action: &str) -> Result<Direction, ApiError> {
    match action {
        "encrypt" => Ok(Direction::Encrypt),
        "decrypt" => Ok(Direction::Decrypt),
        other => Err(ApiError::NotFound(format!("action '{other}' not found"))),
    }
}

fn cipher_for(algorithm: Algorithm, payload: Value) -> Result<(Box<dyn CipherAlgorithm>, String), ApiError> {
    Ok(match algorithm {
        Algorithm::Caesar => {
            let input: ShiftTextInput = parse_body(payload)?;
            (Box::new(Caesar::new(input.shift)), input.text)
        }
        Algorithm::RailFence => {
            let input: ShiftTextInput = parse_body(payload)?;
            (Box::new(RailFence::new(input.shift)), input.text)
        }
        Algorithm::Vigenere => {
            let input: KeyTextInput = parse_body(payload)?;
            (Box::new(Vigenere::new(&input.key)?), input.text)
        }
        Algorithm::Playfair => {
            let input: KeyTextInput = parse_body(payload)?;
            (Box::new(Playfair::new(&input.key)), input.text)
        }
        Algorithm::Des | Algorithm::Aes => {
            return Err(ApiError::NotFound(format!(
                "'{algorithm}' is not a classical cipher, see /api/modern/{algorithm}"
            )))
        }
    })
}

async fn classical_action(
    State(state): State<Arc<AppState>>,
    Path((algo, action)): Path<(String, String)>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let algorithm: Algorithm = algo.parse()?;
    let direction = parse_action(&action)?;
    log::info!("classical {algorithm} {direction}");

    let (cipher, text) = cipher_for(algorithm, payload)?;
    let (field, output) = match direction {
        Direction::Encrypt => ("cipher", cipher.encrypt(&text)?),
        Direction::Decrypt => ("plain", cipher.decrypt(&text)?),
    };

    state.persist(SimulationRecord::new(algorithm.as_str(), direction.as_str(), &text, &output));

    Ok(Json(json!({
        "algorithm": algorithm.as_str(),
        "action": direction.as_str(),
        (field): output,
    })))
}
