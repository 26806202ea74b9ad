//! # ECDSA P-256 Scheme
//!
//! ECDSA over NIST P-256 with the digest used directly as the prehash.
//! Nonces follow RFC 6979, so signing is deterministic.
//!
//! Signatures are the fixed-width 64-byte `r || s` encoding. DER is not
//! accepted.

use cryptohub_core::{CspError, Digest, Signature};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand_core::RngCore;

use super::{check_digest_len, random_secret, wrong_scheme, SignatureScheme};
use crate::algorithm::Algorithm;
use crate::key::{KeyMaterial, SoftwareKey};

/// Required digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Signature length in bytes (`r || s`).
pub const SIGNATURE_LEN: usize = 64;

/// Bound on rejection sampling for a valid scalar. A random 32-byte string
/// is out of range with probability below 2^-32, so this only trips on a
/// broken RNG.
const MAX_SCALAR_ATTEMPTS: usize = 8;

/// ECDSA P-256 signing and verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaP256Scheme;

impl SignatureScheme for EcdsaP256Scheme {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EcdsaP256
    }

    fn generate(
        &self,
        rng: &mut dyn RngCore,
        exportable: bool,
    ) -> Result<SoftwareKey, CspError> {
        for _ in 0..MAX_SCALAR_ATTEMPTS {
            let candidate = random_secret(rng)?;
            if let Ok(signing_key) = p256::ecdsa::SigningKey::from_slice(candidate.as_slice()) {
                return Ok(SoftwareKey::new(
                    KeyMaterial::EcdsaP256Private(signing_key),
                    exportable,
                ));
            }
        }
        Err(CspError::GenerationFailure(format!(
            "no valid P-256 scalar after {MAX_SCALAR_ATTEMPTS} attempts"
        )))
    }

    fn sign(&self, key: &SoftwareKey, digest: &Digest) -> Result<Signature, CspError> {
        let signing_key = match key.material() {
            KeyMaterial::EcdsaP256Private(sk) => sk,
            KeyMaterial::EcdsaP256Public(_) => {
                return Err(CspError::InvalidKeyUsage(
                    "ECDSA-P256 public keys cannot sign".to_string(),
                ))
            }
            _ => return Err(wrong_scheme(self.algorithm(), key)),
        };
        check_digest_len(digest, DIGEST_LEN)?;
        let sig: p256::ecdsa::Signature = signing_key
            .sign_prehash(digest.as_bytes())
            .map_err(|e| CspError::InvalidKeyUsage(format!("ECDSA-P256 signing failed: {e}")))?;
        Ok(Signature::from_bytes(sig.to_bytes().to_vec()))
    }

    fn verify(
        &self,
        key: &SoftwareKey,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<bool, CspError> {
        let verifying_key = match key.material() {
            KeyMaterial::EcdsaP256Private(sk) => sk.verifying_key(),
            KeyMaterial::EcdsaP256Public(vk) => vk,
            _ => return Err(wrong_scheme(self.algorithm(), key)),
        };
        check_digest_len(digest, DIGEST_LEN)?;
        if signature.len() != SIGNATURE_LEN {
            return Err(CspError::MalformedSignature(format!(
                "ECDSA-P256 signature must be {SIGNATURE_LEN} bytes, got {}",
                signature.len()
            )));
        }
        let sig = p256::ecdsa::Signature::from_slice(signature.as_bytes()).map_err(|e| {
            CspError::MalformedSignature(format!("invalid ECDSA-P256 signature scalars: {e}"))
        })?;
        Ok(verifying_key
            .verify_prehash(digest.as_bytes(), &sig)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::test_rng::CountingRng;
    use cryptohub_core::Key;

    fn keypair() -> (SoftwareKey, SoftwareKey) {
        let private = EcdsaP256Scheme
            .generate(&mut CountingRng(7), false)
            .unwrap();
        let public = private.public_key().unwrap();
        (private, public)
    }

    #[test]
    fn sign_and_verify() {
        let (private, public) = keypair();
        let digest = Digest::sha256(b"transfer");
        let sig = EcdsaP256Scheme.sign(&private, &digest).unwrap();
        assert_eq!(sig.len(), SIGNATURE_LEN);
        assert!(EcdsaP256Scheme.verify(&public, &digest, &sig).unwrap());
    }

    #[test]
    fn rfc6979_is_deterministic() {
        let (private, _) = keypair();
        let digest = Digest::sha256(b"same input");
        assert_eq!(
            EcdsaP256Scheme.sign(&private, &digest).unwrap(),
            EcdsaP256Scheme.sign(&private, &digest).unwrap()
        );
    }

    #[test]
    fn tampered_digest_is_false() {
        let (private, public) = keypair();
        let sig = EcdsaP256Scheme
            .sign(&private, &Digest::sha256(b"one"))
            .unwrap();
        assert!(!EcdsaP256Scheme
            .verify(&public, &Digest::sha256(b"two"), &sig)
            .unwrap());
    }

    #[test]
    fn public_key_cannot_sign() {
        let (_, public) = keypair();
        assert!(matches!(
            EcdsaP256Scheme.sign(&public, &Digest::sha256(b"x")),
            Err(CspError::InvalidKeyUsage(_))
        ));
    }

    #[test]
    fn zero_scalars_are_malformed() {
        let (_, public) = keypair();
        let zeros = Signature::from_bytes(vec![0u8; SIGNATURE_LEN]);
        assert!(matches!(
            EcdsaP256Scheme.verify(&public, &Digest::sha256(b"x"), &zeros),
            Err(CspError::MalformedSignature(_))
        ));
    }

    #[test]
    fn der_length_signature_is_malformed() {
        let (_, public) = keypair();
        let der_like = Signature::from_bytes(vec![0x30; 70]);
        assert!(matches!(
            EcdsaP256Scheme.verify(&public, &Digest::sha256(b"x"), &der_like),
            Err(CspError::MalformedSignature(_))
        ));
    }

    #[test]
    fn wrong_digest_length_rejected() {
        let (private, _) = keypair();
        assert!(matches!(
            EcdsaP256Scheme.sign(&private, &Digest::from_bytes(vec![0u8; 48])),
            Err(CspError::InvalidDigestLength { expected: 32, actual: 48 })
        ));
    }
}
