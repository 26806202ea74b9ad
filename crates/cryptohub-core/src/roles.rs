//! # Provider Roles
//!
//! The three capabilities a cryptographic service provider offers, and
//! [`Csp`], their composition.
//!
//! Each role is generic over the provider's key type `K`, so a provider
//! cannot be handed a key from a different provider. All methods take
//! `&self` and every role requires `Send + Sync`: calls are independent and
//! may run concurrently.

use crate::digest::Digest;
use crate::error::CspError;
use crate::key::Key;
use crate::opts::KeyGenOpts;
use crate::signature::Signature;

/// Generates keys.
pub trait KeyGenerator<K: Key>: Send + Sync {
    /// Generate a key as described by `opts`.
    ///
    /// Fails with [`CspError::UnsupportedAlgorithm`] when `opts.algorithm()`
    /// names an algorithm the provider does not implement, and with
    /// [`CspError::GenerationFailure`] on an entropy or hardware fault.
    fn key_gen(&self, opts: &dyn KeyGenOpts) -> Result<K, CspError>;
}

/// Signs digests.
pub trait Signer<K: Key>: Send + Sync {
    /// Sign `digest` with `key`.
    ///
    /// The caller hashes the message; `digest` must already have the
    /// length the key's scheme expects.
    ///
    /// Fails with [`CspError::InvalidKeyUsage`] when the key cannot sign and
    /// [`CspError::InvalidDigestLength`] when the digest has the wrong size.
    fn sign(&self, key: &K, digest: &Digest) -> Result<Signature, CspError>;
}

/// Verifies signatures over digests.
pub trait Verifier<K: Key>: Send + Sync {
    /// Check `signature` over `digest` against `key`.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not match.
    /// Returns `Err` only when the check cannot be attempted: unusable key,
    /// wrong digest length, malformed signature encoding.
    fn verify(&self, key: &K, digest: &Digest, signature: &Signature)
        -> Result<bool, CspError>;
}

/// A cryptographic service provider: generator, signer, and verifier over
/// one key type.
///
/// Implemented automatically for every type providing all three roles.
pub trait Csp<K: Key>: KeyGenerator<K> + Signer<K> + Verifier<K> {}

impl<K: Key, T> Csp<K> for T where T: KeyGenerator<K> + Signer<K> + Verifier<K> {}
