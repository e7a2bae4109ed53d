use crate::crypto::trace::Trace;

/// Расширение ключа: по ключу строит раундовые ключи и пишет шаги в трассу.
pub trait KeyExpansion {
    type Key: ?Sized;
    type RoundKey;
    type Step;

    fn generate_round_keys(&self, key: &Self::Key, trace: &mut Trace<Self::Step>) -> Vec<Self::RoundKey>;
}
