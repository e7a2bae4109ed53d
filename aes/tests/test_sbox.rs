use aes_sim::rijndael::sbox::{inv_sbox, sbox, INV_S_BOX, RCON, S_BOX};
use std::collections::HashSet;

#[test]
fn test_sbox_known_entries() {
    assert_eq!(S_BOX[0][0], 0x63);
    assert_eq!(S_BOX[5][3], 0xed);
    assert_eq!(S_BOX[15][15], 0x16);
    assert_eq!(sbox(0x00), 0x63);
    assert_eq!(sbox(0x01), 0x7c);
    assert_eq!(sbox(0x53), 0xed);
    assert_eq!(sbox(0xc9), 0xdd);
}

#[test]
fn test_inv_sbox_known_entries() {
    assert_eq!(INV_S_BOX[0][0], 0x52);
    assert_eq!(inv_sbox(0x63), 0x00);
    assert_eq!(inv_sbox(0xed), 0x53);
}

#[test]
fn test_sbox_is_a_permutation() {
    let values: HashSet<u8> = (0..=255u8).map(sbox).collect();
    assert_eq!(values.len(), 256);
    for x in 0..=255u8 {
        assert_eq!(inv_sbox(sbox(x)), x);
        assert_ne!(sbox(x), x, "S-box has no fixed points");
    }
}

#[test]
fn test_rcon() {
    assert_eq!(RCON[1], 0x01);
    assert_eq!(RCON[8], 0x80);
    assert_eq!(RCON[9], 0x1b);
    assert_eq!(RCON[10], 0x36);
}
