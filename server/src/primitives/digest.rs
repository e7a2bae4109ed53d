use super::ToolError;
use sha2::{Digest, Sha256};

pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Salted hash; two calls on the same text give different hashes.
pub fn bcrypt_hash(text: &str, cost: u32) -> Result<String, ToolError> {
    Ok(bcrypt::hash(text, cost)?)
}

/// A malformed hash simply does not match.
pub fn bcrypt_verify(text: &str, hashed: &str) -> bool {
    bcrypt::verify(text, hashed).unwrap_or(false)
}
