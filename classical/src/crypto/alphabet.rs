pub const ALPHABET_LEN: u8 = 26;

/// A letter shifted within its own case. Non-ASCII-letters yield `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub base: char,
    pub position: u8,
    pub new_position: u8,
    pub output: char,
}

/// `shift` must already be reduced to 0..26.
pub fn shift_letter(c: char, shift: u8) -> Option<Shifted> {
    let base = if c.is_ascii_uppercase() {
        b'A'
    } else if c.is_ascii_lowercase() {
        b'a'
    } else {
        return None;
    };

    let position = c as u8 - base;
    let new_position = (position + shift) % ALPHABET_LEN;
    Some(Shifted {
        base: base as char,
        position,
        new_position,
        output: (base + new_position) as char,
    })
}

/// Shift that undoes `shift`.
pub fn inverse_shift(shift: u8) -> u8 {
    (ALPHABET_LEN - shift % ALPHABET_LEN) % ALPHABET_LEN
}
