use lab_core::crypto::cipher_traits::{Direction, SimulationOutput};
use lab_core::crypto::trace::Trace;
use serde::Serialize;

/// Result of a character-level traced run (Caesar, Vigenère).
#[derive(Debug, Clone, Serialize)]
pub struct TextSimulation<S> {
    pub direction: Direction,
    pub final_result: String,
    pub steps: Trace<S>,
}

impl<S> SimulationOutput for TextSimulation<S> {
    fn final_output(&self) -> &str {
        &self.final_result
    }
}
