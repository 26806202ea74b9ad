//! # cryptohub-sw: Software Cryptographic Service Provider
//!
//! An in-process implementation of the `cryptohub-core` contract:
//!
//! - **Ed25519** and **ECDSA P-256** asymmetric signing keys.
//! - **HMAC-SHA256** symmetric keys, whose "signature" is a MAC tag.
//! - **AES-256** symmetric keys, which can be generated and stored but
//!   cannot sign.
//!
//! ## Architecture
//!
//! - **Algorithms** (`algorithm.rs`): the closed set of identifiers this
//!   provider understands.
//! - **Schemes** (`scheme/`): one [`SignatureScheme`] per algorithm, each
//!   wrapping an audited crate (`ed25519-dalek`, `p256`, `hmac`).
//! - **Registry** (`registry.rs`): maps enabled algorithms to schemes. Key
//!   generation, signing, and verification all dispatch through it.
//! - **Key store** (`keystore.rs`): keeps non-ephemeral keys, addressed by
//!   SKI.
//! - **Provider** (`provider.rs`): [`SoftwareCsp`], the composition
//!   implementing `KeyGenerator`, `Signer`, and `Verifier`.
//!
//! ## Security Notice
//!
//! Key material lives in process memory and is protected by OS isolation
//! only. Secret material is zeroized on drop.

pub mod algorithm;
pub mod config;
pub mod key;
pub mod keystore;
pub mod provider;
pub mod registry;
pub mod scheme;

pub use algorithm::Algorithm;
pub use config::{ConfigError, CspConfig, KeyStoreKind};
pub use key::{KeyClass, SoftwareKey};
pub use keystore::{InMemoryKeyStore, KeyStore, NullKeyStore};
pub use provider::{create_csp_from_env, SoftwareCsp};
pub use registry::SchemeRegistry;
pub use scheme::SignatureScheme;
