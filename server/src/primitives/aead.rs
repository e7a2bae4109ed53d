use super::{decode_hex, decode_hex_array, derive_key, ToolError};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

pub const NONCE_BYTES: usize = 12;
pub const TAG_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AeadCiphertext {
    pub cipher_hex: String,
    pub nonce_hex: String,
    pub tag_hex: String,
}

fn cipher(passphrase: &str) -> Aes256Gcm {
    let key = derive_key(passphrase);
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key))
}

/// AES-256-GCM with a fresh random nonce; the tag is reported separately.
pub fn encrypt(text: &str, passphrase: &str) -> Result<AeadCiphertext, ToolError> {
    let mut nonce = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut nonce);

    let mut sealed = cipher(passphrase)
        .encrypt(Nonce::from_slice(&nonce), text.as_bytes())
        .map_err(|_| ToolError::Encryption)?;
    let tag = sealed.split_off(sealed.len() - TAG_BYTES);

    Ok(AeadCiphertext {
        cipher_hex: hex::encode(sealed),
        nonce_hex: hex::encode(nonce),
        tag_hex: hex::encode(tag),
    })
}

pub fn decrypt(cipher_hex: &str, passphrase: &str, nonce_hex: &str, tag_hex: &str) -> Result<String, ToolError> {
    let mut sealed = decode_hex("cipher_hex", cipher_hex)?;
    let nonce: [u8; NONCE_BYTES] = decode_hex_array("nonce_hex", nonce_hex)?;
    let tag: [u8; TAG_BYTES] = decode_hex_array("tag_hex", tag_hex)?;
    sealed.extend_from_slice(&tag);

    let plain = cipher(passphrase)
        .decrypt(Nonce::from_slice(&nonce), sealed.as_slice())
        .map_err(|_| ToolError::Decryption)?;
    Ok(String::from_utf8(plain)?)
}
