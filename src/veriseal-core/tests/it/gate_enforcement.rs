//! Gate enforcement: rejected calls must return exactly the sentinel and
//! must not touch key material or the collaborators behind the gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use veriseal_core::{
    EmbeddedKey, EnvironmentProbe, KeyError, KeySource, LookupError, PackageIdentity,
    PackageRegistry, SealConfig, SealEngine, SecretKey,
};

/// Key source that counts how often it is consulted.
struct CountingKeySource {
    calls: AtomicUsize,
}

impl CountingKeySource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeySource for CountingKeySource {
    fn key(&self) -> Result<SecretKey, KeyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        EmbeddedKey.key()
    }
}

/// Registry that counts resolutions.
struct CountingRegistry {
    identity: PackageIdentity,
    calls: AtomicUsize,
}

impl CountingRegistry {
    fn new(identity: PackageIdentity) -> Self {
        Self {
            identity,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PackageRegistry for CountingRegistry {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.clone())
    }
}

struct FixedProbe(bool);

impl EnvironmentProbe for FixedProbe {
    fn is_emulated(&self) -> bool {
        self.0
    }
}

fn config() -> SealConfig {
    SealConfig {
        package_name: "com.example.app".into(),
        certificate_hash: 4242,
        ..SealConfig::default()
    }
}

fn matching() -> PackageIdentity {
    PackageIdentity {
        package_name: "com.example.app".into(),
        certificate_hashes: vec![4242],
    }
}

fn mismatched() -> PackageIdentity {
    PackageIdentity {
        package_name: "com.example.fake".into(),
        certificate_hashes: vec![4242],
    }
}

#[test]
fn rejected_caller_never_reaches_the_key_source() {
    let keys = CountingKeySource::new();
    let engine = SealEngine::with_config(config())
        .with_key_source(keys.clone())
        .with_probe(Arc::new(FixedProbe(false)));
    let caller = mismatched();

    assert_eq!(engine.encode(&caller, "hello").unwrap(), "UNSIGNATURE");
    assert_eq!(engine.decode(&caller, "abcd").unwrap(), "UNSIGNATURE");
    assert_eq!(engine.sign(&caller, "hello").unwrap(), "UNSIGNATURE");

    assert_eq!(keys.calls(), 0, "key derived despite gate rejection");
}

#[test]
fn emulated_environment_never_reaches_the_key_source() {
    let keys = CountingKeySource::new();
    let engine = SealEngine::with_config(config())
        .with_key_source(keys.clone())
        .with_probe(Arc::new(FixedProbe(true)));
    let caller = matching();

    assert_eq!(engine.encode(&caller, "hello").unwrap(), "UNSIGNATURE");
    assert_eq!(engine.decode(&caller, "abcd").unwrap(), "UNSIGNATURE");
    assert_eq!(engine.sign(&caller, "hello").unwrap(), "UNSIGNATURE");

    assert_eq!(keys.calls(), 0);
}

#[test]
fn allowed_caller_derives_one_fresh_key_per_crypto_call() {
    let keys = CountingKeySource::new();
    let engine = SealEngine::with_config(config())
        .with_key_source(keys.clone())
        .with_probe(Arc::new(FixedProbe(false)));
    let caller = matching();

    let ciphertext = engine.encode(&caller, "hello").unwrap();
    assert_eq!(keys.calls(), 1);
    let plaintext = engine.decode(&caller, &ciphertext).unwrap();
    assert_eq!(plaintext, "hello");
    assert_eq!(keys.calls(), 2);

    // Signing involves no key material.
    engine.sign(&caller, "hello").unwrap();
    assert_eq!(keys.calls(), 2);
}

#[test]
fn verdicts_are_recomputed_on_every_call() {
    let registry = CountingRegistry::new(matching());
    let engine = SealEngine::with_config(config()).with_probe(Arc::new(FixedProbe(false)));

    engine.check(&registry);
    engine.encode(&registry, "a").unwrap();
    engine.sign(&registry, "a").unwrap();

    // One oracle resolution per operation; nothing is cached.
    assert_eq!(registry.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn operations_are_safe_to_call_concurrently() {
    let engine = Arc::new(
        SealEngine::with_config(config()).with_probe(Arc::new(FixedProbe(false))),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let caller = matching();
                let payload = format!("payload-{i}");
                let ciphertext = engine.encode(&caller, &payload).unwrap();
                assert_eq!(engine.decode(&caller, &ciphertext).unwrap(), payload);
                assert_eq!(engine.check(&caller), 1);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
