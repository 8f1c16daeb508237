//! AES-128-CBC confidentiality primitive.
//!
//! String-in/string-out, matching the wire contract of the original native
//! layer: ciphertext travels as standard base64 text. PKCS#7 padding (equal
//! to PKCS5 at the 16-byte block size) and a fixed all-zero IV, as the
//! original primitive defines; the padding and IV scheme are not redesigned
//! here.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::key::SecretKey;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// IV defined by the external primitive's deterministic contract.
const IV: [u8; 16] = [0u8; 16];

/// Errors from the cipher facade.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Ciphertext text is not valid base64.
    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Decryption produced invalid PKCS#7 padding (wrong key or corrupt
    /// ciphertext).
    #[error("invalid padding after decryption")]
    Padding,

    /// Decrypted bytes are not valid UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Encrypt `plaintext` under `key`, returning base64 ciphertext.
pub fn encrypt(plaintext: &str, key: &SecretKey) -> String {
    let ciphertext = Aes128CbcEnc::new(key.as_bytes().into(), &IV.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    BASE64_STANDARD.encode(ciphertext)
}

/// Decrypt base64 `ciphertext` under `key`, returning the plaintext string.
pub fn decrypt(ciphertext: &str, key: &SecretKey) -> Result<String, CipherError> {
    let raw = BASE64_STANDARD.decode(ciphertext.trim())?;
    let plaintext = Aes128CbcDec::new(key.as_bytes().into(), &IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&raw)
        .map_err(|_| CipherError::Padding)?;
    Ok(String::from_utf8(plaintext)?)
}
