pub mod config;
pub mod error;
pub mod primitives;
pub mod routes;
pub mod simulation;
pub mod state;
pub mod store;

pub use config::{Settings, ToolSettings};
pub use error::ApiError;
pub use routes::app;
pub use simulation::{simulate, Algorithm, SimulationEnvelope, SimulationOutcome, MAX_TEXT_CHARS};
pub use state::AppState;
pub use store::{DisabledStore, ResultSink, SimulationRecord, SqliteStore, StoreError};
