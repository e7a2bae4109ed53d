use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::post;
use axum::Router;

use crate::error::ApiError;
use crate::routes::JsonBody;
use crate::simulation::{self, Algorithm, SimulationEnvelope};
use crate::state::AppState;
use crate::store::SimulationRecord;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/simulate/{algo}", post(simulate_algorithm))
}

async fn simulate_algorithm(
    State(state): State<Arc<AppState>>,
    Path(algo): Path<String>,
    JsonBody(payload): JsonBody,
) -> Result<Json<SimulationEnvelope>, ApiError> {
    let algorithm: Algorithm = algo.parse()?;
    log::info!("simulate {algorithm}");

    let run = simulation::simulate(algorithm, payload)?;

    // Fire and forget: the response does not depend on the write.
    state.persist(SimulationRecord::new(
        algorithm.as_str(),
        "simulate",
        &run.input_text,
        run.output_text(),
    ));

    Ok(Json(run.envelope))
}
