use crate::error::ApiError;
use aes_sim::{AesSimulation, AesSimulator};
use classical::{
    Caesar, CaesarStep, Playfair, PlayfairSimulation, RailFence, RailFenceSimulation, TextSimulation, Vigenere,
    VigenereStep,
};
use des_sim::{DesSimulation, DesSimulator};
use lab_core::{Direction, SimulationOutput, TracedCipher};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the text of one traced run. Text-level traces keep a
/// running result per step, so their size grows with the square of the input.
pub const MAX_TEXT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Caesar,
    Vigenere,
    Playfair,
    Des,
    Aes,
    RailFence,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Caesar,
        Algorithm::Vigenere,
        Algorithm::Playfair,
        Algorithm::Des,
        Algorithm::Aes,
        Algorithm::RailFence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Caesar => "caesar",
            Algorithm::Vigenere => "vigenere",
            Algorithm::Playfair => "playfair",
            Algorithm::Des => "des",
            Algorithm::Aes => "aes",
            Algorithm::RailFence => "railfence",
        }
    }

    /// Classical ciphers work on letters; DES and AES on byte blocks.
    pub fn is_classical(&self) -> bool {
        !matches!(self, Algorithm::Des | Algorithm::Aes)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| ApiError::NotFound(format!("algorithm '{s}' not found or not supported")))
    }
}

/// Body for Caesar (`shift`) and Rail Fence (`shift` or `depth`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTextInput {
    pub text: String,
    #[serde(alias = "depth")]
    pub shift: i64,
    #[serde(default)]
    pub direction: Direction,
}

/// Body for the keyed ciphers.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyTextInput {
    pub text: String,
    pub key: String,
    #[serde(default)]
    pub direction: Direction,
}

pub fn parse_input<T: DeserializeOwned>(algorithm: Algorithm, payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload)
        .map_err(|e| ApiError::Validation(format!("invalid data for {algorithm}: {e}")))
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SimulationOutcome {
    Caesar(TextSimulation<CaesarStep>),
    Vigenere(TextSimulation<VigenereStep>),
    Playfair(PlayfairSimulation),
    RailFence(RailFenceSimulation),
    Des(DesSimulation),
    Aes(AesSimulation),
}

impl SimulationOutcome {
    pub fn step_count(&self) -> usize {
        match self {
            SimulationOutcome::Caesar(s) => s.steps.len(),
            SimulationOutcome::Vigenere(s) => s.steps.len(),
            SimulationOutcome::Playfair(s) => s.steps.len(),
            SimulationOutcome::RailFence(s) => s.steps.len(),
            SimulationOutcome::Des(s) => s.steps.len(),
            SimulationOutcome::Aes(s) => s.steps.len(),
        }
    }
}

impl SimulationOutput for SimulationOutcome {
    fn final_output(&self) -> &str {
        match self {
            SimulationOutcome::Caesar(s) => s.final_output(),
            SimulationOutcome::Vigenere(s) => s.final_output(),
            SimulationOutcome::Playfair(s) => s.final_output(),
            SimulationOutcome::RailFence(s) => s.final_output(),
            SimulationOutcome::Des(s) => s.final_output(),
            SimulationOutcome::Aes(s) => s.final_output(),
        }
    }
}

/// `{algorithm, final_result | final_result_hex, steps, ...}`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationEnvelope {
    pub algorithm: Algorithm,
    #[serde(flatten)]
    pub outcome: SimulationOutcome,
}

/// A finished run plus what gets stored for it.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub envelope: SimulationEnvelope,
    pub input_text: String,
    pub direction: Direction,
}

impl SimulationRun {
    pub fn output_text(&self) -> &str {
        self.envelope.outcome.final_output()
    }
}

fn check_text_len(text: &str) -> Result<(), ApiError> {
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ApiError::Validation(format!(
            "text is {len} characters long, simulations accept at most {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Validates the payload for `algorithm` and runs the traced engine.
pub fn simulate(algorithm: Algorithm, payload: Value) -> Result<SimulationRun, ApiError> {
    if let Some(text) = payload.get("text").and_then(Value::as_str) {
        check_text_len(text)?;
    }

    let (outcome, input_text, direction) = match algorithm {
        Algorithm::Caesar => {
            let input: ShiftTextInput = parse_input(algorithm, payload)?;
            let simulation = Caesar::new(input.shift).simulate(&input.text, input.direction)?;
            (SimulationOutcome::Caesar(simulation), input.text, input.direction)
        }
        Algorithm::RailFence => {
            let input: ShiftTextInput = parse_input(algorithm, payload)?;
            let simulation = RailFence::new(input.shift).simulate(&input.text, input.direction)?;
            (SimulationOutcome::RailFence(simulation), input.text, input.direction)
        }
        Algorithm::Vigenere => {
            let input: KeyTextInput = parse_input(algorithm, payload)?;
            let simulation = Vigenere::new(&input.key)?.simulate(&input.text, input.direction)?;
            (SimulationOutcome::Vigenere(simulation), input.text, input.direction)
        }
        Algorithm::Playfair => {
            let input: KeyTextInput = parse_input(algorithm, payload)?;
            let simulation = Playfair::new(&input.key).simulate(&input.text, input.direction)?;
            (SimulationOutcome::Playfair(simulation), input.text, input.direction)
        }
        Algorithm::Des => {
            let input: KeyTextInput = parse_input(algorithm, payload)?;
            let simulation = DesSimulator::new(&input.key).simulate(&input.text, input.direction)?;
            (SimulationOutcome::Des(simulation), input.text, input.direction)
        }
        Algorithm::Aes => {
            let input: KeyTextInput = parse_input(algorithm, payload)?;
            let simulation = AesSimulator::new(&input.key).simulate(&input.text, input.direction)?;
            (SimulationOutcome::Aes(simulation), input.text, input.direction)
        }
    };

    log::debug!("{algorithm} {direction} produced {} trace steps", outcome.step_count());

    Ok(SimulationRun {
        envelope: SimulationEnvelope { algorithm, outcome },
        input_text,
        direction,
    })
}
