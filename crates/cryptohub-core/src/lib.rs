//! # cryptohub-core: Cryptographic Service Provider Contract
//!
//! Defines the contract every cryptographic service provider (CSP) in the
//! workspace implements. The crate holds no cryptographic logic of its own;
//! concrete schemes live in provider crates such as `cryptohub-sw`.
//!
//! ## Roles
//!
//! - [`Key`]: opaque handle to key material with capability queries.
//! - [`KeyGenOpts`]: names the algorithm to generate, plus provider hints.
//! - [`KeyGenerator`], [`Signer`], [`Verifier`]: the three provider roles.
//! - [`Csp`]: the composition of all three for one key type.
//!
//! ## Key Design Principles
//!
//! 1. **Role-typed bytes.** [`Digest`], [`Signature`], and [`KeyBytes`] are
//!    distinct newtypes. Passing a signature where a digest is expected is a
//!    compile error.
//!
//! 2. **Callers hash.** Signing and verification operate on digests only.
//!    [`Digest::sha256`] is the caller-side helper for the common case.
//!
//! 3. **Mismatch is not an error.** [`Verifier::verify`] returns `Ok(false)`
//!    for a well-formed signature that does not match, and `Err` only when the
//!    check cannot be attempted at all.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cryptohub-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod key;
pub mod opts;
pub mod roles;
pub mod signature;

// Re-export primary types for ergonomic imports.
pub use digest::Digest;
pub use error::CspError;
pub use key::{Key, KeyBytes, Ski};
pub use opts::{KeyGenOptions, KeyGenOpts};
pub use roles::{Csp, KeyGenerator, Signer, Verifier};
pub use signature::Signature;
