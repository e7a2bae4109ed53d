use crate::crypto::errors::LabError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Encrypt,
    Decrypt,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text-in, text-out view of a cipher.
pub trait CipherAlgorithm {
    fn encrypt(&self, text: &str) -> Result<String, LabError>;
    fn decrypt(&self, text: &str) -> Result<String, LabError>;
}

pub trait SimulationOutput {
    /// The string the lab shows (and stores) as the result of a run.
    fn final_output(&self) -> &str;
}

/// A cipher that can replay its work step by step.
pub trait TracedCipher {
    type Simulation: SimulationOutput + Serialize;

    fn simulate(&self, text: &str, direction: Direction) -> Result<Self::Simulation, LabError>;
}
