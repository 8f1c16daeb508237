//! Error types for gated crypto operations.
//!
//! Internally everything is a typed error; across the FFI boundary failures
//! collapse to the 4-valued check code or the sentinel string, because the
//! boundary can only carry strings and integers.

use thiserror::Error;

use crate::cipher::CipherError;
use crate::key::KeyError;

/// Errors surfaced by [`crate::engine::SealEngine`] operations.
///
/// A gate rejection is NOT an error: rejected calls succeed and yield the
/// configured sentinel string, indistinguishable from real output at the
/// API surface. These variants cover genuine processing failures on the
/// allowed path.
#[derive(Debug, Error)]
pub enum SealError {
    /// The embedded key material could not be reconstructed.
    #[error("key derivation failed: {0}")]
    Key(#[from] KeyError),

    /// The cipher rejected its input (bad base64, bad padding, non-UTF-8).
    #[error("cipher failed: {0}")]
    Cipher(#[from] CipherError),
}
