//! Configuration for the integrity gate and signer.
//!
//! The expected identity, signing constant and sentinel used to be
//! compiled-in globals in the original native library. Here they form one
//! immutable value constructed at process start and passed explicitly into
//! the gate and signer, so tests can run with alternate identities.

use serde::{Deserialize, Serialize};

/// Immutable configuration for a [`crate::engine::SealEngine`].
///
/// Mirrors the fields a release build embeds: the package identity the
/// library was built for, the 32-bit fingerprint hash of its signing
/// certificate, the application-level signing constant, and the sentinel
/// string returned whenever the gate rejects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealConfig {
    /// Expected package name of the hosting application.
    pub package_name: String,
    /// Expected certificate fingerprint hash (32-bit, platform `hashCode`).
    pub certificate_hash: i32,
    /// Static signing constant appended to payloads before digesting.
    /// A configuration value, not a per-call secret.
    pub sign_key: String,
    /// Fixed value returned in place of cipher/digest output on rejection.
    pub sentinel: String,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.app".into(),
            certificate_hash: -1_318_926_437,
            sign_key: "vs#2024!aKx9".into(),
            sentinel: "UNSIGNATURE".into(),
        }
    }
}
