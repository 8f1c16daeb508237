//! Keyed digest signing.
//!
//! Concatenates the payload with the static application-level signing
//! constant, digests the result with MD5 and renders it as 32 lowercase hex
//! characters.
//!
//! This is a checksum with a fixed salt, not a MAC: the constant is not a
//! per-message secret and anyone who can read the binary can recover it. It
//! provides tamper evidence against casual modification only. The scheme is
//! deliberately left as-is.

use md5::{Digest, Md5};

/// Digest `payload || sign_key` into a 32-character lowercase hex string.
pub fn sign(payload: &str, sign_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    hasher.update(sign_key.as_bytes());
    hex::encode(hasher.finalize())
}
