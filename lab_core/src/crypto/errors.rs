use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    #[error("bit vectors differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("expected {expected} hex digits, got '{input}'")]
    InvalidHex { input: String, expected: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("ciphertext length {len} is not a multiple of the rail depth {depth}")]
    RailFenceLength { len: usize, depth: usize },

    #[error("key schedule produced {got} round keys, {needed} required")]
    RoundKeys { got: usize, needed: usize },
}

impl LabError {
    /// Errors caused by the caller's input rather than by an engine fault.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LabError::InvalidHex { .. } | LabError::InvalidKey(_) | LabError::RailFenceLength { .. }
        )
    }
}
