use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_steps::{DesStep, SBoxRound};
use crate::crypto::des_tables::{FP, IP, SHIFT_BITS};
use crate::crypto::des_transformation::DesTransformation;
use bitvec::prelude::BitSlice;
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::feistel_network::FeistelNetwork;
use lab_core::crypto::key_expansion::KeyExpansion;
use lab_core::crypto::trace::Trace;
use lab_core::crypto::utils::{
    bits_to_bytes, bits_to_hex, bits_to_string, block_to_text, hex_to_bits, permute, text_to_bits, Bits,
};
use serde::Serialize;

pub const BLOCK_BYTES: usize = 8;
const BLOCK_BITS: usize = BLOCK_BYTES * 8;

pub struct Des {
    feistel_network: FeistelNetwork<DesTransformation>,
    key_expansion: DesKeyExpansion,
}

impl Default for Des {
    fn default() -> Self {
        Self::new()
    }
}

impl Des {
    pub fn new() -> Self {
        Des {
            feistel_network: FeistelNetwork::new(SHIFT_BITS.len(), DesTransformation),
            key_expansion: DesKeyExpansion,
        }
    }

    pub fn round_keys(&self, key: &BitSlice, trace: &mut Trace<DesStep>) -> Result<Vec<Bits>, LabError> {
        check_block(key)?;
        Ok(self.key_expansion.generate_round_keys(key, trace))
    }

    pub fn encrypt_block(&self, block: &BitSlice, key: &BitSlice) -> Result<Bits, LabError> {
        let mut scratch = Trace::new();
        let round_keys = self.round_keys(key, &mut scratch)?;
        let (output, _) = self.process(block, &round_keys, &mut scratch)?;
        Ok(output)
    }

    pub fn decrypt_block(&self, block: &BitSlice, key: &BitSlice) -> Result<Bits, LabError> {
        let mut scratch = Trace::new();
        let mut round_keys = self.round_keys(key, &mut scratch)?;
        round_keys.reverse();
        let (output, _) = self.process(block, &round_keys, &mut scratch)?;
        Ok(output)
    }

    /// IP, 16 раундов Фейстеля, перестановка половин, IP^-1.
    fn process(
        &self,
        block: &BitSlice,
        round_keys: &[Bits],
        trace: &mut Trace<DesStep>,
    ) -> Result<(Bits, Vec<SBoxRound>), LabError> {
        check_block(block)?;

        let permuted = permute(block, &IP);
        trace.push(DesStep::InitialPermutation {
            description: "Initial permutation (IP)".to_string(),
            input: bits_to_string(block),
            output: bits_to_string(&permuted),
        });

        let (left, right) = permuted.split_at(BLOCK_BITS / 2);
        trace.push(DesStep::Split {
            description: "Split into L0 and R0 (32 bits each)".to_string(),
            left: bits_to_string(left),
            right: bits_to_string(right),
        });

        let rounds = self
            .feistel_network
            .run(left.to_bitvec(), right.to_bitvec(), round_keys)?;

        let mut s_box_traces = Vec::with_capacity(rounds.len());
        let mut halves = None;
        for round in rounds {
            let n = round.round;
            trace.push(DesStep::Round {
                round: n,
                description: format!(
                    "L{n} = R{prev}; R{n} = L{prev} XOR F(R{prev}, K{n})",
                    prev = n - 1
                ),
                left_in: bits_to_string(&round.left_in),
                right_in: bits_to_string(&round.right_in),
                round_key: bits_to_string(&round.round_key),
                expanded: bits_to_string(&round.function_trace.expanded),
                xored: bits_to_string(&round.function_trace.xored),
                sbox_output: bits_to_string(&round.function_trace.sbox_output),
                function_output: bits_to_string(&round.function_output),
                left: bits_to_string(&round.left),
                right: bits_to_string(&round.right),
            });
            s_box_traces.push(SBoxRound {
                round: n,
                full_output: bits_to_string(&round.function_trace.sbox_output),
                details: round.function_trace.lookups,
            });
            halves = Some((round.left, round.right));
        }

        let (left, right) = halves.ok_or(LabError::RoundKeys {
            got: round_keys.len(),
            needed: self.feistel_network.num_rounds(),
        })?;

        // После 16-го раунда половины меняются местами: R16 || L16
        let mut combined = right;
        combined.extend_from_bitslice(&left);
        trace.push(DesStep::Swap {
            description: "Swap halves: R16 || L16".to_string(),
            combined: bits_to_string(&combined),
        });

        Ok((permute(&combined, &FP), s_box_traces))
    }
}

fn check_block(bits: &BitSlice) -> Result<(), LabError> {
    if bits.len() != BLOCK_BITS {
        return Err(LabError::LengthMismatch {
            left: bits.len(),
            right: BLOCK_BITS,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct DesSimulation {
    pub direction: Direction,
    pub final_result_hex: String,
    pub final_result_bits: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_result_text: Option<String>,
    pub steps: Trace<DesStep>,
    pub s_box_traces: Vec<SBoxRound>,
}

impl SimulationOutput for DesSimulation {
    fn final_output(&self) -> &str {
        &self.final_result_hex
    }
}

/// DES over a text key (space-padded/truncated to 8 bytes).
/// Encryption takes text, decryption takes a 16-digit hex block.
pub struct DesSimulator {
    des: Des,
    key: String,
}

impl DesSimulator {
    pub fn new(key: &str) -> Self {
        DesSimulator {
            des: Des::new(),
            key: key.to_string(),
        }
    }

    fn key_bits(&self) -> Bits {
        text_to_bits(&self.key, BLOCK_BYTES)
    }
}

impl TracedCipher for DesSimulator {
    type Simulation = DesSimulation;

    fn simulate(&self, text: &str, direction: Direction) -> Result<DesSimulation, LabError> {
        let block = match direction {
            Direction::Encrypt => text_to_bits(text, BLOCK_BYTES),
            Direction::Decrypt => hex_to_bits(text, BLOCK_BITS)?,
        };
        let key_bits = self.key_bits();

        let mut steps = Trace::new();
        steps.push(DesStep::Preprocess {
            description: match direction {
                Direction::Encrypt => "Text and key padded with spaces to 8 bytes, 8 bits per byte".to_string(),
                Direction::Decrypt => "Ciphertext parsed from hex; key padded with spaces to 8 bytes".to_string(),
            },
            input: text.to_string(),
            key: self.key.clone(),
            input_bits: bits_to_string(&block),
            key_bits: bits_to_string(&key_bits),
        });

        let mut round_keys = self.des.round_keys(&key_bits, &mut steps)?;
        if direction == Direction::Decrypt {
            round_keys.reverse();
        }

        let (output, s_box_traces) = self.des.process(&block, &round_keys, &mut steps)?;
        let final_result_hex = bits_to_hex(&output);
        steps.push(DesStep::FinalPermutation {
            description: "Final permutation (IP^-1)".to_string(),
            output_bits: bits_to_string(&output),
            final_result_hex: final_result_hex.clone(),
        });

        let final_result_text = match direction {
            Direction::Encrypt => None,
            Direction::Decrypt => Some(block_to_text(&bits_to_bytes(&output), b' ')),
        };

        Ok(DesSimulation {
            direction,
            final_result_hex,
            final_result_bits: bits_to_string(&output),
            final_result_text,
            steps,
            s_box_traces,
        })
    }
}

impl CipherAlgorithm for DesSimulator {
    /// Returns the ciphertext block as 16 uppercase hex digits.
    fn encrypt(&self, text: &str) -> Result<String, LabError> {
        let output = self
            .des
            .encrypt_block(&text_to_bits(text, BLOCK_BYTES), &self.key_bits())?;
        Ok(bits_to_hex(&output))
    }

    fn decrypt(&self, text: &str) -> Result<String, LabError> {
        let block = hex_to_bits(text, BLOCK_BITS)?;
        let output = self.des.decrypt_block(&block, &self.key_bits())?;
        Ok(block_to_text(&bits_to_bytes(&output), b' '))
    }
}
