//! # Signature Schemes
//!
//! Each algorithm the provider supports is a [`SignatureScheme`]. The
//! registry resolves an algorithm to its scheme; the provider never matches
//! on algorithms itself.
//!
//! Schemes receive randomness as `&mut dyn RngCore` so generation failures
//! can be driven from tests. The provider passes `OsRng`.

pub mod aes;
pub mod ecdsa;
pub mod ed25519;
pub mod hmac;

use cryptohub_core::{CspError, Digest, Signature};
use rand_core::RngCore;
use zeroize::Zeroizing;

use crate::algorithm::Algorithm;
use crate::key::{Secret32, SoftwareKey};

pub use self::aes::Aes256Scheme;
pub use self::ecdsa::EcdsaP256Scheme;
pub use self::ed25519::Ed25519Scheme;
pub use self::hmac::HmacSha256Scheme;

/// Capability interface implemented once per algorithm.
///
/// Implementations are stateless and `Send + Sync`. `sign` and `verify` may
/// assume the key's algorithm matches [`SignatureScheme::algorithm`]; a
/// mismatched key is reported as [`CspError::InvalidKeyType`].
pub trait SignatureScheme: Send + Sync {
    /// The algorithm this scheme implements.
    fn algorithm(&self) -> Algorithm;

    /// Generate a fresh key.
    fn generate(&self, rng: &mut dyn RngCore, exportable: bool)
        -> Result<SoftwareKey, CspError>;

    /// Sign a digest.
    fn sign(&self, key: &SoftwareKey, digest: &Digest) -> Result<Signature, CspError>;

    /// Verify a signature; `Ok(false)` on a well-formed mismatch.
    fn verify(
        &self,
        key: &SoftwareKey,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<bool, CspError>;
}

/// Draw 32 bytes of key material, mapping RNG faults to
/// [`CspError::GenerationFailure`].
pub(crate) fn random_secret(rng: &mut dyn RngCore) -> Result<Secret32, CspError> {
    let mut secret = Zeroizing::new([0u8; 32]);
    rng.try_fill_bytes(secret.as_mut_slice())
        .map_err(|e| CspError::GenerationFailure(format!("system randomness unavailable: {e}")))?;
    Ok(secret)
}

pub(crate) fn check_digest_len(digest: &Digest, expected: usize) -> Result<(), CspError> {
    if digest.len() != expected {
        return Err(CspError::InvalidDigestLength {
            expected,
            actual: digest.len(),
        });
    }
    Ok(())
}

pub(crate) fn wrong_scheme(scheme: Algorithm, key: &SoftwareKey) -> CspError {
    CspError::InvalidKeyType(format!(
        "{} key passed to {scheme} scheme",
        key.algorithm()
    ))
}
