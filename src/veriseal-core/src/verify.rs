//! Package signature verification.
//!
//! Compares the identity reported by the registry oracle against the
//! compiled-in expectation, in strict order:
//!
//! 1. oracle resolution — any failure collapses to [`SignatureCheck::LookupFailure`];
//! 2. package name — mismatch short-circuits to `IdentityMismatch` without
//!    ever inspecting the certificate;
//! 3. first certificate fingerprint — mismatch yields `CertificateMismatch`;
//! 4. otherwise `Pass`.
//!
//! A verdict is produced fresh on every call and never cached.

use tracing::{debug, warn};

use crate::config::SealConfig;
use crate::registry::PackageRegistry;

/// Outcome of a signature verification, with its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    /// Identity and certificate both match (`1`).
    Pass,
    /// The declared package name does not match (`-1`).
    IdentityMismatch,
    /// The first signing certificate does not match (`-2`).
    CertificateMismatch,
    /// The registry oracle could not be consulted (`-3`).
    LookupFailure,
}

impl SignatureCheck {
    /// Integer code carried across the foreign boundary.
    pub const fn code(self) -> i32 {
        match self {
            Self::Pass => 1,
            Self::IdentityMismatch => -1,
            Self::CertificateMismatch => -2,
            Self::LookupFailure => -3,
        }
    }
}

/// Verifies the caller's package identity and signing certificate.
pub struct SignatureVerifier<'a> {
    config: &'a SealConfig,
}

impl<'a> SignatureVerifier<'a> {
    /// Create a verifier over the expected identity in `config`.
    pub fn new(config: &'a SealConfig) -> Self {
        Self { config }
    }

    /// Run the checks in strict order against a caller context.
    ///
    /// An identity mismatch never reveals whether the certificate would
    /// have matched.
    pub fn verify(&self, registry: &dyn PackageRegistry) -> SignatureCheck {
        let identity = match registry.resolve() {
            Ok(identity) => identity,
            Err(err) => {
                warn!(error = %err, "package registry lookup failed");
                return SignatureCheck::LookupFailure;
            }
        };

        if identity.package_name != self.config.package_name {
            warn!(
                declared = %identity.package_name,
                "package name mismatch"
            );
            return SignatureCheck::IdentityMismatch;
        }

        let Some(&fingerprint) = identity.certificate_hashes.first() else {
            warn!("package declares no signing certificates");
            return SignatureCheck::LookupFailure;
        };

        if fingerprint != self.config.certificate_hash {
            warn!(observed = fingerprint, "certificate fingerprint mismatch");
            return SignatureCheck::CertificateMismatch;
        }

        debug!("signature check passed");
        SignatureCheck::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LookupError, PackageIdentity};

    fn config() -> SealConfig {
        SealConfig {
            package_name: "com.example.app".into(),
            certificate_hash: 0x5EAF00D,
            ..SealConfig::default()
        }
    }

    struct FailingRegistry(fn() -> LookupError);

    impl PackageRegistry for FailingRegistry {
        fn resolve(&self) -> Result<PackageIdentity, LookupError> {
            Err((self.0)())
        }
    }

    #[test]
    fn matching_identity_passes() {
        let config = config();
        let caller = PackageIdentity {
            package_name: "com.example.app".into(),
            certificate_hashes: vec![0x5EAF00D],
        };
        let check = SignatureVerifier::new(&config).verify(&caller);
        assert_eq!(check, SignatureCheck::Pass);
        assert_eq!(check.code(), 1);
    }

    #[test]
    fn wrong_package_name_is_identity_mismatch() {
        let config = config();
        let caller = PackageIdentity {
            package_name: "com.example.fake".into(),
            certificate_hashes: vec![0x5EAF00D],
        };
        let check = SignatureVerifier::new(&config).verify(&caller);
        assert_eq!(check, SignatureCheck::IdentityMismatch);
        assert_eq!(check.code(), -1);
    }

    #[test]
    fn identity_is_checked_before_certificate() {
        // Both the name and the certificate are wrong; the verdict must be
        // the identity mismatch, never the certificate one.
        let config = config();
        let caller = PackageIdentity {
            package_name: "com.example.fake".into(),
            certificate_hashes: vec![12345],
        };
        let check = SignatureVerifier::new(&config).verify(&caller);
        assert_eq!(check.code(), -1);
    }

    #[test]
    fn wrong_certificate_is_certificate_mismatch() {
        let config = config();
        let caller = PackageIdentity {
            package_name: "com.example.app".into(),
            certificate_hashes: vec![12345, 0x5EAF00D],
        };
        // Only the first certificate is inspected.
        let check = SignatureVerifier::new(&config).verify(&caller);
        assert_eq!(check, SignatureCheck::CertificateMismatch);
        assert_eq!(check.code(), -2);
    }

    #[test]
    fn every_lookup_failure_collapses_to_minus_three() {
        let config = config();
        let verifier = SignatureVerifier::new(&config);

        let sites: [fn() -> LookupError; 4] = [
            || LookupError::RegistryUnavailable {
                reason: "service down".into(),
            },
            || LookupError::MethodUnresolved {
                method: "getPackageManager",
            },
            || LookupError::FieldAbsent {
                field: "signatures",
            },
            || LookupError::NoCertificates,
        ];
        for site in sites {
            let check = verifier.verify(&FailingRegistry(site));
            assert_eq!(check, SignatureCheck::LookupFailure);
            assert_eq!(check.code(), -3);
        }
    }

    #[test]
    fn empty_certificate_list_collapses_to_lookup_failure() {
        let config = config();
        let caller = PackageIdentity {
            package_name: "com.example.app".into(),
            certificate_hashes: vec![],
        };
        let check = SignatureVerifier::new(&config).verify(&caller);
        assert_eq!(check.code(), -3);
    }
}
