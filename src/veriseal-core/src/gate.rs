//! The integrity gate guarding every cryptographic entrypoint.
//!
//! Composes the signature verifier and the environment probe into a single
//! pass/reject decision. Both must report a trustworthy environment for the
//! gate to allow any crypto work.

use tracing::debug;

use crate::config::SealConfig;
use crate::probe::EnvironmentProbe;
use crate::registry::PackageRegistry;
use crate::verify::{SignatureCheck, SignatureVerifier};

/// Binary gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Dispatch to the cipher/signer may proceed.
    Allow,
    /// Return the sentinel; no cryptographic work occurs.
    Reject,
}

/// Pass/reject gate over a signature check and an emulator probe.
pub struct IntegrityGate<'a> {
    verifier: SignatureVerifier<'a>,
    probe: &'a dyn EnvironmentProbe,
}

impl<'a> IntegrityGate<'a> {
    /// Build a gate over an expected identity and an environment probe.
    pub fn new(config: &'a SealConfig, probe: &'a dyn EnvironmentProbe) -> Self {
        Self {
            verifier: SignatureVerifier::new(config),
            probe,
        }
    }

    /// Full gating decision: signature check AND environment check.
    pub fn evaluate(&self, registry: &dyn PackageRegistry) -> GateDecision {
        let check = self.verifier.verify(registry);
        if check != SignatureCheck::Pass {
            debug!(code = check.code(), "gate reject: signature check");
            return GateDecision::Reject;
        }
        if self.probe.is_emulated() {
            debug!("gate reject: emulated environment");
            return GateDecision::Reject;
        }
        GateDecision::Allow
    }

    /// Raw signature check, bypassing the emulator probe.
    ///
    /// For callers that need the granular code rather than the binary
    /// decision.
    pub fn raw_check(&self, registry: &dyn PackageRegistry) -> SignatureCheck {
        self.verifier.verify(registry)
    }
}
