use crate::gf::arithmetic::inverse;

/// Аффинное преобразование FIPS-197:
/// b'_i = b_i ⊕ b_{i+4} ⊕ b_{i+5} ⊕ b_{i+6} ⊕ b_{i+7} ⊕ c_i, c = 0x63
const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const fn build_sbox() -> [[u8; 16]; 16] {
    let mut table = [[0u8; 16]; 16];
    let mut i = 0;
    while i < 256 {
        table[i >> 4][i & 0x0f] = affine(inverse(i as u8));
        i += 1;
    }
    table
}

const fn build_inv_sbox(sbox: &[[u8; 16]; 16]) -> [[u8; 16]; 16] {
    let mut table = [[0u8; 16]; 16];
    let mut i = 0;
    while i < 256 {
        let value = sbox[i >> 4][i & 0x0f] as usize;
        table[value >> 4][value & 0x0f] = i as u8;
        i += 1;
    }
    table
}

/// S_BOX[старший полубайт][младший полубайт]
pub const S_BOX: [[u8; 16]; 16] = build_sbox();
pub const INV_S_BOX: [[u8; 16]; 16] = build_inv_sbox(&S_BOX);

/// Раундовые константы; RCON[0] не используется.
pub const RCON: [u8; 11] = [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

pub const fn sbox(x: u8) -> u8 {
    S_BOX[(x >> 4) as usize][(x & 0x0f) as usize]
}

pub const fn inv_sbox(x: u8) -> u8 {
    INV_S_BOX[(x >> 4) as usize][(x & 0x0f) as usize]
}
