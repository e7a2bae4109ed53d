use crate::rijndael::cipher::{
    add_round_key, aes_decrypt_block, aes_encrypt_block, inv_mix_columns, inv_shift_rows, inv_sub_bytes,
    mix_columns, shift_rows, sub_bytes,
};
use crate::rijndael::key_schedule::{AesKeyExpansion, ROUNDS};
use crate::rijndael::state::{block_to_state, state_to_block, Matrix, State};
use crate::rijndael::steps::{AesStep, RoundOperation};
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::key_expansion::KeyExpansion;
use lab_core::crypto::trace::Trace;
use lab_core::crypto::utils::{block_to_text, text_to_block};
use serde::Serialize;

pub const BLOCK_BYTES: usize = 16;

enum Transform<'a> {
    SubBytes,
    ShiftRows,
    MixColumns,
    AddRoundKey(&'a State),
    InvSubBytes,
    InvShiftRows,
    InvMixColumns,
}

fn apply(state: State, transform: Transform<'_>) -> (State, RoundOperation) {
    let before = Matrix(state);
    match transform {
        Transform::SubBytes => {
            let after = sub_bytes(&state);
            (after, RoundOperation::SubBytes { before, after: Matrix(after) })
        }
        Transform::ShiftRows => {
            let after = shift_rows(&state);
            (after, RoundOperation::ShiftRows { before, after: Matrix(after) })
        }
        Transform::MixColumns => {
            let after = mix_columns(&state);
            (after, RoundOperation::MixColumns { before, after: Matrix(after) })
        }
        Transform::AddRoundKey(key) => {
            let after = add_round_key(&state, key);
            (
                after,
                RoundOperation::AddRoundKey {
                    before,
                    round_key: Matrix(*key),
                    after: Matrix(after),
                },
            )
        }
        Transform::InvSubBytes => {
            let after = inv_sub_bytes(&state);
            (after, RoundOperation::InvSubBytes { before, after: Matrix(after) })
        }
        Transform::InvShiftRows => {
            let after = inv_shift_rows(&state);
            (after, RoundOperation::InvShiftRows { before, after: Matrix(after) })
        }
        Transform::InvMixColumns => {
            let after = inv_mix_columns(&state);
            (after, RoundOperation::InvMixColumns { before, after: Matrix(after) })
        }
    }
}

/// Applies the transforms in order and records them as one round.
fn run_round(state: State, round: usize, transforms: Vec<Transform<'_>>, trace: &mut Trace<AesStep>) -> State {
    let mut state = state;
    let mut operations = Vec::with_capacity(transforms.len());
    for transform in transforms {
        let (next, operation) = apply(state, transform);
        operations.push(operation);
        state = next;
    }

    let description = operations
        .iter()
        .map(RoundOperation::name)
        .collect::<Vec<_>>()
        .join(" -> ");
    trace.push(AesStep::Round {
        round,
        description: format!("Round {round}: {description}"),
        operations,
        state: Matrix(state),
    });
    state
}

fn encrypt_rounds(state: State, round_keys: &[State], trace: &mut Trace<AesStep>) -> State {
    let mut state = run_round(state, 0, vec![Transform::AddRoundKey(&round_keys[0])], trace);

    for round in 1..ROUNDS {
        state = run_round(
            state,
            round,
            vec![
                Transform::SubBytes,
                Transform::ShiftRows,
                Transform::MixColumns,
                Transform::AddRoundKey(&round_keys[round]),
            ],
            trace,
        );
    }

    run_round(
        state,
        ROUNDS,
        vec![
            Transform::SubBytes,
            Transform::ShiftRows,
            Transform::AddRoundKey(&round_keys[ROUNDS]),
        ],
        trace,
    )
}

fn decrypt_rounds(state: State, round_keys: &[State], trace: &mut Trace<AesStep>) -> State {
    let mut state = run_round(state, 0, vec![Transform::AddRoundKey(&round_keys[ROUNDS])], trace);

    for round in 1..ROUNDS {
        state = run_round(
            state,
            round,
            vec![
                Transform::InvShiftRows,
                Transform::InvSubBytes,
                Transform::AddRoundKey(&round_keys[ROUNDS - round]),
                Transform::InvMixColumns,
            ],
            trace,
        );
    }

    run_round(
        state,
        ROUNDS,
        vec![
            Transform::InvShiftRows,
            Transform::InvSubBytes,
            Transform::AddRoundKey(&round_keys[0]),
        ],
        trace,
    )
}

fn parse_block(input: &str) -> Result<[u8; 16], LabError> {
    let invalid = || LabError::InvalidHex {
        input: input.to_string(),
        expected: BLOCK_BYTES * 2,
    };
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    bytes.try_into().map_err(|_| invalid())
}

fn to_block(text: &str) -> [u8; 16] {
    let mut block = [0u8; BLOCK_BYTES];
    block.copy_from_slice(&text_to_block(text, BLOCK_BYTES, 0));
    block
}

#[derive(Debug, Clone, Serialize)]
pub struct AesSimulation {
    pub direction: Direction,
    pub final_result_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_result_text: Option<String>,
    pub steps: Trace<AesStep>,
}

impl SimulationOutput for AesSimulation {
    fn final_output(&self) -> &str {
        &self.final_result_hex
    }
}

/// AES-128 with a text key (UTF-8 bytes, zero-padded or truncated to 16).
/// Encryption takes text, decryption takes a 32-digit hex block.
pub struct AesSimulator {
    key_text: String,
    key: [u8; 16],
}

impl AesSimulator {
    pub fn new(key: &str) -> Self {
        AesSimulator {
            key_text: key.to_string(),
            key: to_block(key),
        }
    }

    pub fn from_key_bytes(key: &[u8; 16]) -> Self {
        AesSimulator {
            key_text: hex::encode(key),
            key: *key,
        }
    }

    /// Traced run over a raw block, bypassing the text padding rules.
    pub fn simulate_block(&self, block: &[u8; 16], direction: Direction) -> AesSimulation {
        self.trace_block(&hex::encode(block), block, direction)
    }

    fn trace_block(&self, input: &str, block: &[u8; 16], direction: Direction) -> AesSimulation {
        let state = block_to_state(block);

        let mut steps = Trace::new();
        steps.push(AesStep::Preprocess {
            description: match direction {
                Direction::Encrypt => "Text and key zero-padded to 16 bytes, loaded column by column".to_string(),
                Direction::Decrypt => "Ciphertext parsed from hex; key zero-padded to 16 bytes".to_string(),
            },
            input: input.to_string(),
            key: self.key_text.clone(),
            input_hex: hex::encode(block),
            key_hex: hex::encode(self.key),
            state: Matrix(state),
            key_state: Matrix(block_to_state(&self.key)),
        });

        let round_keys = AesKeyExpansion.generate_round_keys(&self.key, &mut steps);
        let output = match direction {
            Direction::Encrypt => encrypt_rounds(state, &round_keys, &mut steps),
            Direction::Decrypt => decrypt_rounds(state, &round_keys, &mut steps),
        };

        let output_block = state_to_block(&output);
        let final_result_hex = hex::encode(output_block);
        let final_result_text = match direction {
            Direction::Encrypt => None,
            Direction::Decrypt => Some(block_to_text(&output_block, 0)),
        };

        steps.push(AesStep::Final {
            description: "State read out column by column".to_string(),
            final_result_hex: final_result_hex.clone(),
            final_result_text: final_result_text.clone(),
        });

        AesSimulation {
            direction,
            final_result_hex,
            final_result_text,
            steps,
        }
    }
}

impl TracedCipher for AesSimulator {
    type Simulation = AesSimulation;

    fn simulate(&self, text: &str, direction: Direction) -> Result<AesSimulation, LabError> {
        let block = match direction {
            Direction::Encrypt => to_block(text),
            Direction::Decrypt => parse_block(text)?,
        };
        Ok(self.trace_block(text, &block, direction))
    }
}

impl CipherAlgorithm for AesSimulator {
    /// Returns the ciphertext block as 32 lowercase hex digits.
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        Ok(hex::encode(aes_encrypt_block(&to_block(text), &self.key)))
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        let block = parse_block(text)?;
        let plain = aes_decrypt_block(&block, &self.key);
        Ok(block_to_text(&plain, 0))
    }
}
