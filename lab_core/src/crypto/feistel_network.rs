use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::errors::LabError;
use crate::crypto::utils::{xor, Bits};

/// Один раунд: L_i = R_{i-1}, R_i = L_{i-1} xor F(R_{i-1}, K_i).
#[derive(Debug, Clone, PartialEq)]
pub struct FeistelRound<T> {
    pub round: usize,
    pub left_in: Bits,
    pub right_in: Bits,
    pub round_key: Bits,
    pub function_output: Bits,
    pub function_trace: T,
    pub left: Bits,
    pub right: Bits,
}

pub struct FeistelNetwork<T> {
    num_rounds: usize,
    transformation: T,
}

impl<T: EncryptionTransformation> FeistelNetwork<T> {
    pub fn new(num_rounds: usize, transformation: T) -> Self {
        Self {
            num_rounds,
            transformation,
        }
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// Прогоняет все раунды и возвращает запись о каждом.
    /// Для расшифрования достаточно передать ключи в обратном порядке.
    pub fn run(
        &self,
        left: Bits,
        right: Bits,
        round_keys: &[Bits],
    ) -> Result<Vec<FeistelRound<T::Trace>>, LabError> {
        if round_keys.len() < self.num_rounds {
            return Err(LabError::RoundKeys {
                got: round_keys.len(),
                needed: self.num_rounds,
            });
        }

        let mut rounds = Vec::with_capacity(self.num_rounds);
        let mut left = left;
        let mut right = right;

        for (index, round_key) in round_keys.iter().take(self.num_rounds).enumerate() {
            let (function_output, function_trace) = self.transformation.transform(&right, round_key)?;
            let new_right = xor(&left, &function_output)?;
            let new_left = right.clone();

            rounds.push(FeistelRound {
                round: index + 1,
                left_in: left,
                right_in: right,
                round_key: round_key.clone(),
                function_output,
                function_trace,
                left: new_left.clone(),
                right: new_right.clone(),
            });

            left = new_left;
            right = new_right;
        }

        Ok(rounds)
    }
}
