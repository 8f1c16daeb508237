//! # veriseal-core
//!
//! Integrity-gated cryptographic facade for a mobile application's native
//! layer.
//!
//! Every sensitive operation is wrapped by an integrity gate: the running
//! package must match an expected identity and signing certificate, and the
//! process must not be executing inside an emulated environment. Only then is
//! any AES or digest work performed; otherwise a fixed sentinel string is
//! returned and no key material is ever derived.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SealEngine                            │
//! │                                                             │
//! │  ┌───────────────────┐        ┌─────────────────────┐      │
//! │  │ SignatureVerifier │        │  EnvironmentProbe   │      │
//! │  │ (package oracle)  │        │  (emulator check)   │      │
//! │  └─────────┬─────────┘        └──────────┬──────────┘      │
//! │            └────────────┬────────────────┘                 │
//! │                         ▼                                  │
//! │               ┌──────────────────┐                         │
//! │               │  IntegrityGate   │  Allow / Reject         │
//! │               └────────┬─────────┘                         │
//! │                        ▼                                   │
//! │   ┌───────────┐  ┌───────────────┐  ┌──────────────┐      │
//! │   │ KeySource │─▶│  AES-128-CBC  │  │ MD5 sign     │      │
//! │   │ (per call)│  │  encode/decode│  │ (fixed salt) │      │
//! │   └───────────┘  └───────────────┘  └──────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! - **Gate-before-crypto**: no cipher or digest work while the gate rejects;
//!   the rejected path returns the sentinel without consulting the key source.
//! - **Fresh verdicts**: identity and environment are re-checked on every
//!   call; nothing is cached.
//! - **Ephemeral keys**: the AES key is rebuilt per call and zeroized when
//!   the call returns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)] // Allow Type in module::Type
#![allow(clippy::must_use_candidate)] // Not all functions need must_use

pub mod cipher;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod key;
pub mod probe;
pub mod registry;
pub mod signer;
pub mod tripwire;
pub mod verify;

pub use cipher::CipherError;
pub use config::SealConfig;
pub use engine::SealEngine;
pub use error::SealError;
pub use gate::{GateDecision, IntegrityGate};
pub use key::{EmbeddedKey, KeyError, KeySource, SecretKey};
pub use probe::{EnvironmentProbe, HostProbe};
pub use registry::{LookupError, PackageIdentity, PackageRegistry};
pub use verify::{SignatureCheck, SignatureVerifier};
