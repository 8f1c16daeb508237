//! Gated crypto dispatch.
//!
//! [`SealEngine`] is the single entry point behind the FFI layer. Every
//! operation re-evaluates the integrity gate against the caller context it
//! is handed; on rejection the configured sentinel string is returned and no
//! key derivation, cipher or digest work happens at all.
//!
//! The engine holds no mutable state. All operations are synchronous,
//! reentrant and safe to call concurrently; the only per-call resource is
//! the derived key, which is zeroized when the call returns.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cipher;
use crate::config::SealConfig;
use crate::error::SealError;
use crate::gate::{GateDecision, IntegrityGate};
use crate::key::{EmbeddedKey, KeySource};
use crate::probe::{EnvironmentProbe, HostProbe};
use crate::registry::PackageRegistry;
use crate::signer;

/// The gated crypto facade.
pub struct SealEngine {
    config: SealConfig,
    key_source: Arc<dyn KeySource>,
    probe: Arc<dyn EnvironmentProbe>,
}

impl SealEngine {
    /// Engine with the embedded key, host probe and default configuration.
    pub fn new() -> Self {
        Self::with_config(SealConfig::default())
    }

    /// Engine with a custom expected identity and signing constants.
    pub fn with_config(config: SealConfig) -> Self {
        Self {
            config,
            key_source: Arc::new(EmbeddedKey),
            probe: Arc::new(HostProbe),
        }
    }

    /// Replace the key source (provisioned key material, test doubles).
    pub fn with_key_source(mut self, key_source: Arc<dyn KeySource>) -> Self {
        self.key_source = key_source;
        self
    }

    /// Replace the environment probe.
    pub fn with_probe(mut self, probe: Arc<dyn EnvironmentProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    fn gate(&self) -> IntegrityGate<'_> {
        IntegrityGate::new(&self.config, self.probe.as_ref())
    }

    fn sentinel(&self) -> String {
        self.config.sentinel.clone()
    }

    /// Raw signature check code: `1` pass, `-1` identity mismatch,
    /// `-2` certificate mismatch, `-3` lookup failure.
    ///
    /// Bypasses the emulator probe.
    pub fn check(&self, registry: &dyn PackageRegistry) -> i32 {
        self.gate().raw_check(registry).code()
    }

    /// Gated AES-128-CBC encrypt; base64 ciphertext out.
    ///
    /// Returns the sentinel when the gate rejects. The key is derived fresh
    /// for this call and dropped (zeroized) before returning.
    pub fn encode(
        &self,
        registry: &dyn PackageRegistry,
        plaintext: &str,
    ) -> Result<String, SealError> {
        if self.gate().evaluate(registry) == GateDecision::Reject {
            warn!("encode rejected by integrity gate");
            return Ok(self.sentinel());
        }
        let key = self.key_source.key()?;
        debug!(len = plaintext.len(), "encoding payload");
        Ok(cipher::encrypt(plaintext, &key))
    }

    /// Gated AES-128-CBC decrypt of base64 ciphertext.
    ///
    /// Returns the sentinel when the gate rejects.
    pub fn decode(
        &self,
        registry: &dyn PackageRegistry,
        ciphertext: &str,
    ) -> Result<String, SealError> {
        if self.gate().evaluate(registry) == GateDecision::Reject {
            warn!("decode rejected by integrity gate");
            return Ok(self.sentinel());
        }
        let key = self.key_source.key()?;
        debug!(len = ciphertext.len(), "decoding payload");
        Ok(cipher::decrypt(ciphertext, &key)?)
    }

    /// Gated keyed digest over `payload || sign_key`, as 32 lowercase hex
    /// characters.
    ///
    /// Returns the sentinel when the gate rejects. No key material is
    /// involved; the signing constant is configuration, not a secret.
    pub fn sign(&self, registry: &dyn PackageRegistry, payload: &str) -> Result<String, SealError> {
        if self.gate().evaluate(registry) == GateDecision::Reject {
            warn!("sign rejected by integrity gate");
            return Ok(self.sentinel());
        }
        Ok(signer::sign(payload, &self.config.sign_key))
    }
}

impl Default for SealEngine {
    fn default() -> Self {
        Self::new()
    }
}
