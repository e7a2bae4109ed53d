use crate::crypto::errors::LabError;
use crate::crypto::utils::Bits;
use bitvec::prelude::BitSlice;

/// Раундовая функция F(half, round_key) сети Фейстеля.
/// Кроме результата возвращает описание своих промежуточных шагов.
pub trait EncryptionTransformation {
    type Trace;

    fn transform(&self, half: &BitSlice, round_key: &BitSlice) -> Result<(Bits, Self::Trace), LabError>;
}
