//! The integer-code and sentinel contract as seen from the foreign boundary.

use std::sync::Arc;

use veriseal_core::{
    EnvironmentProbe, LookupError, PackageIdentity, PackageRegistry, SealConfig, SealEngine,
};

struct NotEmulated;

impl EnvironmentProbe for NotEmulated {
    fn is_emulated(&self) -> bool {
        false
    }
}

struct BrokenRegistry(LookupError);

impl PackageRegistry for BrokenRegistry {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        Err(self.0.clone())
    }
}

fn engine() -> SealEngine {
    SealEngine::with_config(SealConfig {
        package_name: "com.example.app".into(),
        certificate_hash: 1000,
        ..SealConfig::default()
    })
    .with_probe(Arc::new(NotEmulated))
}

fn caller(package: &str, certs: Vec<i32>) -> PackageIdentity {
    PackageIdentity {
        package_name: package.into(),
        certificate_hashes: certs,
    }
}

#[test]
fn check_codes_cover_the_full_taxonomy() {
    let engine = engine();

    assert_eq!(engine.check(&caller("com.example.app", vec![1000])), 1);
    assert_eq!(engine.check(&caller("com.example.fake", vec![1000])), -1);
    assert_eq!(engine.check(&caller("com.example.app", vec![2000])), -2);
    assert_eq!(engine.check(&caller("com.example.app", vec![])), -3);
}

#[test]
fn identity_mismatch_wins_over_certificate_mismatch() {
    // Both wrong at once: the identity code must come back, never -2.
    let engine = engine();
    assert_eq!(engine.check(&caller("com.example.fake", vec![2000])), -1);
}

#[test]
fn all_lookup_sites_collapse_to_minus_three() {
    let engine = engine();
    let errors = [
        LookupError::RegistryUnavailable {
            reason: "binder died".into(),
        },
        LookupError::MethodUnresolved {
            method: "getPackageInfo",
        },
        LookupError::FieldAbsent {
            field: "signatures",
        },
        LookupError::NoCertificates,
    ];
    for error in errors {
        assert_eq!(engine.check(&BrokenRegistry(error)), -3);
    }
}

#[test]
fn reference_scenario_round_trip_and_fake_package() {
    let engine = engine();
    let genuine = caller("com.example.app", vec![1000]);

    let ciphertext = engine.encode(&genuine, "hello").unwrap();
    assert!(!ciphertext.is_empty());
    assert_ne!(ciphertext, "hello");
    assert_eq!(engine.decode(&genuine, &ciphertext).unwrap(), "hello");

    let fake = caller("com.example.fake", vec![1000]);
    assert_eq!(engine.encode(&fake, "hello").unwrap(), "UNSIGNATURE");
}

#[test]
fn rejection_is_indistinguishable_from_real_output_by_type() {
    // The sentinel is an ordinary string, not an error: a caller cannot
    // tell a rejection apart from a legitimately sentinel-shaped payload.
    let engine = engine();
    let fake = caller("com.example.fake", vec![1000]);
    let output: String = engine.sign(&fake, "payload").unwrap();
    assert_eq!(output, engine.config().sentinel);
}

#[test]
fn sign_matches_the_documented_shape() {
    let engine = engine();
    let genuine = caller("com.example.app", vec![1000]);
    let digest = engine.sign(&genuine, "payload").unwrap();
    assert_eq!(digest.len(), 32);
    assert!(digest.chars().all(|c| "0123456789abcdef".contains(c)));
}
