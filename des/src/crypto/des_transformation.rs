use crate::crypto::des_steps::SBoxLookup;
use crate::crypto::des_tables::{E, P, S_BOXES};
use bitvec::prelude::BitSlice;
use lab_core::crypto::encryption_transformation::EncryptionTransformation;
use lab_core::crypto::errors::LabError;
use lab_core::crypto::utils::{bits_to_string, permute, xor, Bits};

pub struct DesTransformation;

/// Intermediate values of one F(R, K) evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTrace {
    pub expanded: Bits,
    pub xored: Bits,
    pub lookups: Vec<SBoxLookup>,
    pub sbox_output: Bits,
}

fn nibble_to_bits(value: u8) -> Bits {
    (0..4).rev().map(|i| (value >> i) & 1 == 1).collect()
}

fn bits_to_index(bits: &BitSlice) -> usize {
    bits.iter().by_vals().fold(0, |acc, bit| (acc << 1) | bit as usize)
}

fn sbox_lookup(index: usize, chunk: &BitSlice) -> SBoxLookup {
    let row_bits: Bits = [chunk[0], chunk[5]].into_iter().collect();
    let column_bits = &chunk[1..5];
    let row = bits_to_index(&row_bits);
    let column = bits_to_index(column_bits);
    let value = S_BOXES[index][row][column];

    SBoxLookup {
        sbox: index + 1,
        input: bits_to_string(chunk),
        row,
        row_bits: bits_to_string(&row_bits),
        column,
        column_bits: bits_to_string(column_bits),
        value,
        output: bits_to_string(&nibble_to_bits(value)),
    }
}

impl EncryptionTransformation for DesTransformation {
    type Trace = FunctionTrace;

    fn transform(&self, half: &BitSlice, round_key: &BitSlice) -> Result<(Bits, FunctionTrace), LabError> {
        if half.len() != 32 {
            return Err(LabError::LengthMismatch {
                left: half.len(),
                right: 32,
            });
        }

        // 1. Expansion
        let expanded = permute(half, &E);

        // 2. XOR
        let xored = xor(&expanded, round_key)?;

        // 3. S-boxes
        let mut sbox_output = Bits::with_capacity(32);
        let mut lookups = Vec::with_capacity(S_BOXES.len());
        for (index, chunk) in xored.chunks(6).enumerate() {
            let lookup = sbox_lookup(index, chunk);
            sbox_output.extend_from_bitslice(&nibble_to_bits(lookup.value));
            lookups.push(lookup);
        }

        // 4. P-permutation
        let output = permute(&sbox_output, &P);

        Ok((
            output,
            FunctionTrace {
                expanded,
                xored,
                lookups,
                sbox_output,
            },
        ))
    }
}
