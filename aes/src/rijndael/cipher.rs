use crate::gf::arithmetic::{inv_mix_column, mix_column};
use crate::rijndael::key_schedule::{expand_key, KeySchedule, ROUNDS};
use crate::rijndael::sbox::{inv_sbox, sbox};
use crate::rijndael::state::{block_to_state, state_to_block, State};

pub fn add_round_key(state: &State, round_key: &State) -> State {
    let mut out = *state;
    for (column, key_column) in out.iter_mut().zip(round_key) {
        for (byte, key_byte) in column.iter_mut().zip(key_column) {
            *byte ^= key_byte;
        }
    }
    out
}

pub fn sub_bytes(state: &State) -> State {
    state.map(|column| column.map(sbox))
}

pub fn inv_sub_bytes(state: &State) -> State {
    state.map(|column| column.map(inv_sbox))
}

/// Строка r циклически сдвигается влево на r позиций.
pub fn shift_rows(state: &State) -> State {
    let mut out = *state;
    for r in 1..4 {
        for c in 0..4 {
            out[c][r] = state[(c + r) % 4][r];
        }
    }
    out
}

pub fn inv_shift_rows(state: &State) -> State {
    let mut out = *state;
    for r in 1..4 {
        for c in 0..4 {
            out[(c + r) % 4][r] = state[c][r];
        }
    }
    out
}

pub fn mix_columns(state: &State) -> State {
    state.map(mix_column)
}

pub fn inv_mix_columns(state: &State) -> State {
    state.map(inv_mix_column)
}

pub fn encrypt_state(state: &State, schedule: &KeySchedule) -> State {
    let round_keys = schedule.round_keys();
    let mut state = add_round_key(state, &round_keys[0]);

    for round_key in &round_keys[1..ROUNDS] {
        state = sub_bytes(&state);
        state = shift_rows(&state);
        state = mix_columns(&state);
        state = add_round_key(&state, round_key);
    }

    state = sub_bytes(&state);
    state = shift_rows(&state);
    add_round_key(&state, &round_keys[ROUNDS])
}

pub fn decrypt_state(state: &State, schedule: &KeySchedule) -> State {
    let round_keys = schedule.round_keys();
    let mut state = add_round_key(state, &round_keys[ROUNDS]);

    for round_key in round_keys[1..ROUNDS].iter().rev() {
        state = inv_shift_rows(&state);
        state = inv_sub_bytes(&state);
        state = add_round_key(&state, round_key);
        state = inv_mix_columns(&state);
    }

    state = inv_shift_rows(&state);
    state = inv_sub_bytes(&state);
    add_round_key(&state, &round_keys[0])
}

pub fn aes_encrypt_block(block: &[u8; 16], key: &[u8; 16]) -> [u8; 16] {
    state_to_block(&encrypt_state(&block_to_state(block), &expand_key(key)))
}

pub fn aes_decrypt_block(block: &[u8; 16], key: &[u8; 16]) -> [u8; 16] {
    state_to_block(&decrypt_state(&block_to_state(block), &expand_key(key)))
}
