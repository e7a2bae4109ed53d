use crate::crypto::des_steps::DesStep;
use crate::crypto::des_tables::{PC1, PC2, SHIFT_BITS};
use bitvec::prelude::BitSlice;
use lab_core::crypto::key_expansion::KeyExpansion;
use lab_core::crypto::trace::Trace;
use lab_core::crypto::utils::{bits_to_hex, bits_to_string, permute, shift_left_circular, Bits};

pub struct DesKeyExpansion;

impl KeyExpansion for DesKeyExpansion {
    type Key = BitSlice;
    type RoundKey = Bits;
    type Step = DesStep;

    /// Ключ должен быть 64 бита; вызывающий код проверяет длину.
    fn generate_round_keys(&self, key: &BitSlice, trace: &mut Trace<DesStep>) -> Vec<Bits> {
        // 1) PC-1: 64 бита -> 56 бит (биты чётности отбрасываются)
        let permuted = permute(key, &PC1);
        trace.push(DesStep::KeyPermutation {
            description: "PC-1 drops the parity bits: 64 -> 56 bits".to_string(),
            key_bits: bits_to_string(key),
            permuted: bits_to_string(&permuted),
        });

        // 2) Разбиваем на C и D (по 28 бит)
        let (c0, d0) = permuted.split_at(28);
        let mut c = c0.to_bitvec();
        let mut d = d0.to_bitvec();
        trace.push(DesStep::KeySplit {
            description: "Split into C0 and D0 (28 bits each)".to_string(),
            c: bits_to_string(&c),
            d: bits_to_string(&d),
        });

        // 3) Для каждого раунда: сдвигаем C и D, объединяем, применяем PC-2
        let mut round_keys = Vec::with_capacity(SHIFT_BITS.len());
        for (index, &shift) in SHIFT_BITS.iter().enumerate() {
            let round = index + 1;
            c = shift_left_circular(&c, shift);
            d = shift_left_circular(&d, shift);

            let mut cd = c.clone();
            cd.extend_from_bitslice(&d);
            let round_key = permute(&cd, &PC2);

            trace.push(DesStep::KeyRound {
                round,
                description: format!("C{round}, D{round} = rotate left by {shift}; K{round} = PC-2(C{round}D{round})"),
                shift,
                c: bits_to_string(&c),
                d: bits_to_string(&d),
                combined: bits_to_string(&cd),
                round_key: bits_to_string(&round_key),
                round_key_hex: bits_to_hex(&round_key),
            });
            round_keys.push(round_key);
        }

        round_keys
    }
}
