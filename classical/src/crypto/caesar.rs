use crate::crypto::alphabet::{inverse_shift, shift_letter, ALPHABET_LEN};
use crate::crypto::simulation::TextSimulation;
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::trace::Trace;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CaesarStep {
    Init {
        description: String,
        text: String,
        shift: i64,
        effective_shift: u8,
    },
    Char {
        index: usize,
        description: String,
        current_char: char,
        output_char: char,
        intermediate_result: String,
    },
    Final {
        description: String,
        final_result: String,
    },
}

pub struct Caesar {
    shift: i64,
}

impl Caesar {
    pub fn new(shift: i64) -> Self {
        Caesar { shift }
    }

    fn effective_shift(&self, direction: Direction) -> u8 {
        let forward = self.shift.rem_euclid(ALPHABET_LEN as i64) as u8;
        match direction {
            Direction::Encrypt => forward,
            Direction::Decrypt => inverse_shift(forward),
        }
    }

    fn apply(&self, text: &str, direction: Direction) -> String {
        let shift = self.effective_shift(direction);
        text.chars()
            .map(|c| shift_letter(c, shift).map_or(c, |s| s.output))
            .collect()
    }
}

impl CipherAlgorithm for Caesar {
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Encrypt))
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Decrypt))
    }
}

impl TracedCipher for Caesar {
    type Simulation = TextSimulation<CaesarStep>;

    fn simulate(&self, text: &str, direction: Direction) -> Result<Self::Simulation, LabError> {
        let shift = self.effective_shift(direction);
        let mut steps = Trace::new();
        steps.push(CaesarStep::Init {
            description: format!("Text '{text}', shift {} ({direction}), effective shift {shift}", self.shift),
            text: text.to_string(),
            shift: self.shift,
            effective_shift: shift,
        });

        let mut result = String::with_capacity(text.len());
        for (index, c) in text.chars().enumerate() {
            let (output_char, description) = match shift_letter(c, shift) {
                Some(s) => (
                    s.output,
                    format!(
                        "'{c}' at index {index}: base '{}', ({} + {shift}) % 26 = {} -> '{}'",
                        s.base, s.position, s.new_position, s.output
                    ),
                ),
                None => (c, format!("'{c}' at index {index} is not a letter, kept as is")),
            };
            result.push(output_char);
            steps.push(CaesarStep::Char {
                index,
                description,
                current_char: c,
                output_char,
                intermediate_result: result.clone(),
            });
        }

        steps.push(CaesarStep::Final {
            description: format!("Result: '{result}'"),
            final_result: result.clone(),
        });

        Ok(TextSimulation {
            direction,
            final_result: result,
            steps,
        })
    }
}
