//! Secret key reconstruction.
//!
//! The AES key is never stored as a contiguous literal. The embedded
//! representation is assembled one character at a time (to frustrate static
//! string scanning), prefixed with a single interference character that is
//! skipped before base64 decoding the remainder into the 16 raw key bytes.
//!
//! The [`KeySource`] trait decouples the rest of the system from that
//! obfuscation trick: callers only see `key() -> SecretKey`, and a deployment
//! can swap in provisioned key material without touching the gate or cipher.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw 16-byte AES key.
///
/// Ephemeral by contract: rebuilt per cryptographic call, owned exclusively
/// by that call, and zeroized when dropped. Never persisted, never shared
/// across calls.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 16]);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

// Key bytes must never end up in logs or panic messages.
impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([redacted])")
    }
}

/// Errors reconstructing the key from its embedded representation.
///
/// A malformed constant is a build defect, but it surfaces as a typed,
/// terminal error rather than undefined behavior.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The embedded constant is not valid base64 after the offset skip.
    #[error("embedded key material is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded material is not exactly 16 bytes.
    #[error("embedded key material decoded to {actual} bytes, expected 16")]
    WrongLength {
        /// Number of bytes actually decoded.
        actual: usize,
    },
}

/// Source of the AES key used by the crypto facade.
///
/// Implementations must be deterministic and side-effect-free: repeated and
/// concurrent calls return byte-identical keys for the process lifetime.
pub trait KeySource: Send + Sync {
    /// Reconstruct a fresh copy of the key.
    fn key(&self) -> Result<SecretKey, KeyError>;
}

/// Default key source: the obfuscated constant embedded at build time.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedKey;

impl EmbeddedKey {
    /// Assemble the embedded representation character by character.
    ///
    /// Deliberately not a string literal; the first character is
    /// interference and is skipped by the caller.
    fn assemble() -> String {
        let mut s = String::with_capacity(25);
        s.push('N');
        s.push('M');
        s.push('T');
        s.push('l');
        s.push('h');
        s.push('N');
        s.push('j');
        s.push('J');
        s.push('j');
        s.push('O');
        s.push('W');
        s.push('I');
        s.push('5');
        s.push('N');
        s.push('D');
        s.push('g');
        s.push('1');
        s.push('O');
        s.push('D');
        s.push('V');
        s.push('m');
        s.push('Z');
        s.push('g');
        s.push('=');
        s.push('=');
        s
    }
}

impl KeySource for EmbeddedKey {
    fn key(&self) -> Result<SecretKey, KeyError> {
        let assembled = Self::assemble();
        // Skip the interference character before decoding.
        let decoded = BASE64_STANDARD.decode(&assembled[1..])?;
        let bytes: [u8; 16] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| KeyError::WrongLength { actual: v.len() })?;
        Ok(SecretKey::from_bytes(bytes))
    }
}
