use crate::rijndael::key_schedule::WordDerivation;
use crate::rijndael::state::{Matrix, State, Word};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AesStep {
    Preprocess {
        description: String,
        input: String,
        key: String,
        input_hex: String,
        key_hex: String,
        state: Matrix,
        key_state: Matrix,
    },
    KeyWords {
        description: String,
        words: Vec<String>,
    },
    KeySchedule {
        step: String,
        word_index: usize,
        description: String,
        previous: String,
        back_four: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rot_word: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sub_word: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rcon: Option<String>,
        word: String,
    },
    RoundKeys {
        description: String,
        round_keys: Vec<Matrix>,
    },
    Round {
        round: usize,
        description: String,
        operations: Vec<RoundOperation>,
        state: Matrix,
    },
    Final {
        description: String,
        final_result_hex: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        final_result_text: Option<String>,
    },
}

/// One sub-operation inside a round, with the state before and after it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum RoundOperation {
    SubBytes { before: Matrix, after: Matrix },
    ShiftRows { before: Matrix, after: Matrix },
    MixColumns { before: Matrix, after: Matrix },
    AddRoundKey { before: Matrix, round_key: Matrix, after: Matrix },
    InvSubBytes { before: Matrix, after: Matrix },
    InvShiftRows { before: Matrix, after: Matrix },
    InvMixColumns { before: Matrix, after: Matrix },
}

impl RoundOperation {
    pub fn name(&self) -> &'static str {
        match self {
            RoundOperation::SubBytes { .. } => "SubBytes",
            RoundOperation::ShiftRows { .. } => "ShiftRows",
            RoundOperation::MixColumns { .. } => "MixColumns",
            RoundOperation::AddRoundKey { .. } => "AddRoundKey",
            RoundOperation::InvSubBytes { .. } => "InvSubBytes",
            RoundOperation::InvShiftRows { .. } => "InvShiftRows",
            RoundOperation::InvMixColumns { .. } => "InvMixColumns",
        }
    }

    pub fn after(&self) -> &Matrix {
        match self {
            RoundOperation::SubBytes { after, .. }
            | RoundOperation::ShiftRows { after, .. }
            | RoundOperation::MixColumns { after, .. }
            | RoundOperation::AddRoundKey { after, .. }
            | RoundOperation::InvSubBytes { after, .. }
            | RoundOperation::InvShiftRows { after, .. }
            | RoundOperation::InvMixColumns { after, .. } => after,
        }
    }
}

fn word_hex(word: &Word) -> String {
    hex::encode(word)
}

impl AesStep {
    pub fn key_words(words: &[Word]) -> Self {
        AesStep::KeyWords {
            description: "W0..W3 are the key bytes taken four at a time".to_string(),
            words: words.iter().map(word_hex).collect(),
        }
    }

    pub fn round_keys(keys: &[State]) -> Self {
        AesStep::RoundKeys {
            description: format!("{} round keys, column k of round key r is W[4r+k]", keys.len()),
            round_keys: keys.iter().copied().map(Matrix).collect(),
        }
    }
}

impl From<&WordDerivation> for AesStep {
    fn from(d: &WordDerivation) -> Self {
        let i = d.index;
        let description = if d.rot_word.is_some() {
            format!("W{i} = W{} XOR SubWord(RotWord(W{})) XOR RCON[{}]", i - 4, i - 1, i / 4)
        } else {
            format!("W{i} = W{} XOR W{}", i - 4, i - 1)
        };

        AesStep::KeySchedule {
            step: format!("KS-{i}"),
            word_index: i,
            description,
            previous: word_hex(&d.previous),
            back_four: word_hex(&d.back_four),
            rot_word: d.rot_word.as_ref().map(word_hex),
            sub_word: d.sub_word.as_ref().map(word_hex),
            rcon: d.rcon.as_ref().map(word_hex),
            word: word_hex(&d.word),
        }
    }
}
