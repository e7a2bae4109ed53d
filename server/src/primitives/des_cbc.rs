use super::{decode_hex, decode_hex_array, derive_key, ToolError};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

type DesCbcEnc = cbc::Encryptor<des::Des>;
type DesCbcDec = cbc::Decryptor<des::Des>;

pub const KEY_BYTES: usize = 8;
pub const IV_BYTES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CbcCiphertext {
    pub cipher_hex: String,
    pub iv_hex: String,
}

/// First 8 bytes of SHA-256(passphrase); parity bits are ignored by DES.
fn des_key(passphrase: &str) -> [u8; KEY_BYTES] {
    let mut key = [0u8; KEY_BYTES];
    key.copy_from_slice(&derive_key(passphrase)[..KEY_BYTES]);
    key
}

pub fn encrypt(text: &str, passphrase: &str) -> Result<CbcCiphertext, ToolError> {
    let mut iv = [0u8; IV_BYTES];
    OsRng.fill_bytes(&mut iv);

    let key = des_key(passphrase);
    let cipher = DesCbcEnc::new_from_slices(&key, &iv).map_err(|e| ToolError::Key(e.to_string()))?;
    let sealed = cipher.encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes());

    Ok(CbcCiphertext {
        cipher_hex: hex::encode(sealed),
        iv_hex: hex::encode(iv),
    })
}

pub fn decrypt(cipher_hex: &str, passphrase: &str, iv_hex: &str) -> Result<String, ToolError> {
    let sealed = decode_hex("cipher_hex", cipher_hex)?;
    let iv: [u8; IV_BYTES] = decode_hex_array("iv_hex", iv_hex)?;

    let key = des_key(passphrase);
    let cipher = DesCbcDec::new_from_slices(&key, &iv).map_err(|e| ToolError::Key(e.to_string()))?;
    let plain = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&sealed)
        .map_err(|_| ToolError::Decryption)?;
    Ok(String::from_utf8(plain)?)
}
