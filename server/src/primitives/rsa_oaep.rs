use super::{decode_hex, ToolError};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::Sha256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
}

/// PKCS#8 private key and SubjectPublicKeyInfo public key, both PEM.
pub fn generate_keys(bits: usize) -> Result<KeyPair, ToolError> {
    let private_key = RsaPrivateKey::new(&mut OsRng, bits)?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| ToolError::Key(e.to_string()))?;
    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| ToolError::Key(e.to_string()))?;

    Ok(KeyPair {
        private_key: private_pem.to_string(),
        public_key: public_pem,
    })
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey, ToolError> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| ToolError::Key(format!("public key is not a PEM RSA key: {e}")))
}

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, ToolError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| ToolError::Key(format!("private key is not a PEM RSA key: {e}")))
}

pub fn encrypt(text: &str, public_key_pem: &str) -> Result<String, ToolError> {
    let public_key = parse_public_key(public_key_pem)?;
    let sealed = public_key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), text.as_bytes())?;
    Ok(hex::encode(sealed))
}

pub fn decrypt(cipher_hex: &str, private_key_pem: &str) -> Result<String, ToolError> {
    let private_key = parse_private_key(private_key_pem)?;
    let sealed = decode_hex("cipher_hex", cipher_hex)?;
    let plain = private_key
        .decrypt(Oaep::new::<Sha256>(), &sealed)
        .map_err(|_| ToolError::Decryption)?;
    Ok(String::from_utf8(plain)?)
}
