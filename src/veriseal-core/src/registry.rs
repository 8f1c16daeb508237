//! Package registry oracle.
//!
//! The platform's package registry is consumed as a black box: given a caller
//! context it reports the declared package name and the signing
//! certificate(s) attached to it. On Android the real implementation walks
//! PackageManager over JNI; over the plain C ABI the host reports its own
//! identity; tests use in-memory mocks.

use thiserror::Error;

/// What the registry oracle reports about the calling application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Declared package name.
    pub package_name: String,
    /// Fingerprint hashes of the attached signing certificates, in
    /// declaration order. The verifier only inspects the first.
    pub certificate_hashes: Vec<i32>,
}

/// A failure while resolving the caller through the registry oracle.
///
/// The wire protocol collapses all of these to the single `-3` code; the
/// tagged variants exist so logs and native callers can tell the failure
/// sites apart.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The registry service itself could not be reached or instantiated.
    #[error("package registry unavailable: {reason}")]
    RegistryUnavailable {
        /// Platform-specific detail, for logging only.
        reason: String,
    },

    /// A registry method could not be resolved on the platform object.
    #[error("registry method unresolved: {method}")]
    MethodUnresolved {
        /// Name of the method that failed to resolve.
        method: &'static str,
    },

    /// A field expected on the registry entry was absent.
    #[error("registry field absent: {field}")]
    FieldAbsent {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The package carries no signing certificates at all.
    #[error("package has no signing certificates")]
    NoCertificates,
}

/// Resolves the caller's registry entry.
///
/// Implementations capture their own caller context (a JNI `Context` object,
/// host-reported identity, a test fixture) and must recompute the answer on
/// every call; the verifier never caches a verdict.
pub trait PackageRegistry {
    /// Resolve the caller's declared identity and certificates.
    fn resolve(&self) -> Result<PackageIdentity, LookupError>;
}

impl PackageRegistry for PackageIdentity {
    /// A fixed identity is its own registry; used at the C ABI boundary
    /// where the host reports who it claims to be.
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        Ok(self.clone())
    }
}
