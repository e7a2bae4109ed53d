use serde::Serialize;

/// One record of a DES run. Bit quantities are rendered as '0'/'1' strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DesStep {
    Preprocess {
        description: String,
        input: String,
        key: String,
        input_bits: String,
        key_bits: String,
    },
    KeyPermutation {
        description: String,
        key_bits: String,
        permuted: String,
    },
    KeySplit {
        description: String,
        c: String,
        d: String,
    },
    KeyRound {
        round: usize,
        description: String,
        shift: usize,
        c: String,
        d: String,
        combined: String,
        round_key: String,
        round_key_hex: String,
    },
    InitialPermutation {
        description: String,
        input: String,
        output: String,
    },
    Split {
        description: String,
        left: String,
        right: String,
    },
    Round {
        round: usize,
        description: String,
        left_in: String,
        right_in: String,
        round_key: String,
        expanded: String,
        xored: String,
        sbox_output: String,
        function_output: String,
        left: String,
        right: String,
    },
    Swap {
        description: String,
        combined: String,
    },
    FinalPermutation {
        description: String,
        output_bits: String,
        final_result_hex: String,
    },
}

/// Один просмотр S-блока: 6 бит -> строка (крайние биты), столбец (средние 4) -> 4 бита.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SBoxLookup {
    pub sbox: usize,
    pub input: String,
    pub row: usize,
    pub row_bits: String,
    pub column: usize,
    pub column_bits: String,
    pub value: u8,
    pub output: String,
}

/// The eight lookups of one round plus their concatenated 32-bit output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SBoxRound {
    pub round: usize,
    pub details: Vec<SBoxLookup>,
    pub full_output: String,
}
