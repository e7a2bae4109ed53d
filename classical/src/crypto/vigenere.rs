use crate::crypto::alphabet::{inverse_shift, shift_letter};
use crate::crypto::simulation::TextSimulation;
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::trace::Trace;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum VigenereStep {
    Init {
        description: String,
        text: String,
        key: String,
        normalized_key: String,
    },
    Char {
        index: usize,
        description: String,
        current_char: char,
        #[serde(skip_serializing_if = "Option::is_none")]
        key_char_used: Option<char>,
        #[serde(skip_serializing_if = "Option::is_none")]
        key_index: Option<usize>,
        output_char: char,
        intermediate_result: String,
    },
    Final {
        description: String,
        final_result: String,
    },
}

/// The key pointer only advances on letters; everything else passes through.
pub struct Vigenere {
    key: String,
    normalized: Vec<char>,
}

impl Vigenere {
    /// Only the key's ASCII letters are used; a key without any is rejected.
    pub fn new(key: &str) -> Result<Self, LabError> {
        let normalized: Vec<char> = key
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if normalized.is_empty() {
            return Err(LabError::InvalidKey(
                "Vigenère key must contain at least one letter".to_string(),
            ));
        }
        Ok(Vigenere {
            key: key.to_string(),
            normalized,
        })
    }

    pub fn normalized_key(&self) -> String {
        self.normalized.iter().collect()
    }

    fn key_shift(&self, key_index: usize, direction: Direction) -> (char, u8) {
        let key_char = self.normalized[key_index % self.normalized.len()];
        let shift = key_char as u8 - b'A';
        match direction {
            Direction::Encrypt => (key_char, shift),
            Direction::Decrypt => (key_char, inverse_shift(shift)),
        }
    }

    fn apply(&self, text: &str, direction: Direction) -> String {
        let mut key_index = 0;
        text.chars()
            .map(|c| {
                let (_, shift) = self.key_shift(key_index, direction);
                match shift_letter(c, shift) {
                    Some(s) => {
                        key_index += 1;
                        s.output
                    }
                    None => c,
                }
            })
            .collect()
    }
}

impl CipherAlgorithm for Vigenere {
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Encrypt))
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(self.apply(text, Direction::Decrypt))
    }
}

impl TracedCipher for Vigenere {
    type Simulation = TextSimulation<VigenereStep>;

    fn simulate(&self, text: &str, direction: Direction) -> Result<Self::Simulation, LabError> {
        let mut steps = Trace::new();
        steps.push(VigenereStep::Init {
            description: format!(
                "Text '{text}', key '{}' normalized to '{}' ({direction})",
                self.key,
                self.normalized_key()
            ),
            text: text.to_string(),
            key: self.key.clone(),
            normalized_key: self.normalized_key(),
        });

        let mut result = String::with_capacity(text.len());
        let mut key_index = 0;
        for (index, c) in text.chars().enumerate() {
            let (key_char, shift) = self.key_shift(key_index, direction);
            let step = match shift_letter(c, shift) {
                Some(s) => {
                    result.push(s.output);
                    let step = VigenereStep::Char {
                        index,
                        description: format!(
                            "'{c}' at index {index}: key index {key_index} -> '{key_char}' (shift {shift}), \
                             ({} + {shift}) % 26 = {} -> '{}'",
                            s.position, s.new_position, s.output
                        ),
                        current_char: c,
                        key_char_used: Some(key_char),
                        key_index: Some(key_index),
                        output_char: s.output,
                        intermediate_result: result.clone(),
                    };
                    key_index += 1;
                    step
                }
                None => {
                    result.push(c);
                    VigenereStep::Char {
                        index,
                        description: format!("'{c}' at index {index} is not a letter, kept; key does not advance"),
                        current_char: c,
                        key_char_used: None,
                        key_index: None,
                        output_char: c,
                        intermediate_result: result.clone(),
                    }
                }
            };
            steps.push(step);
        }

        steps.push(VigenereStep::Final {
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
