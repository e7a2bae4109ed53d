//! Thin wrappers over vetted library implementations, used by the direct
//! (non-traced) endpoints.

pub mod aead;
pub mod des_cbc;
pub mod digest;
pub mod rsa_oaep;

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid hex in {field}: {source}")]
    Hex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("{field} must be {expected} bytes, got {got}")]
    Length {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("encryption failed")]
    Encryption,

    #[error("decryption failed: wrong key, nonce/IV or tag, or corrupted data")]
    Decryption,

    #[error("decrypted data is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid key: {0}")]
    Key(String),

    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

pub(crate) fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, ToolError> {
    hex::decode(value.trim()).map_err(|source| ToolError::Hex { field, source })
}

pub(crate) fn decode_hex_array<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], ToolError> {
    let bytes = decode_hex(field, value)?;
    let got = bytes.len();
    bytes.try_into().map_err(|_| ToolError::Length {
        field,
        expected: N,
        got,
    })
}

/// SHA-256 of the passphrase, used as key material.
pub(crate) fn derive_key(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}
