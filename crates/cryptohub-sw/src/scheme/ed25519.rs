//! # Ed25519 Scheme
//!
//! Ed25519 over a 32-byte digest. The digest bytes are the signed message;
//! this is plain Ed25519, not Ed25519ph.
//!
//! Signatures are the standard 64-byte `R || S` encoding and are
//! deterministic: the same key and digest always give the same signature.

use cryptohub_core::{CspError, Digest, Signature};
use ed25519_dalek::{Signer as _, Verifier as _};
use rand_core::RngCore;

use super::{check_digest_len, random_secret, wrong_scheme, SignatureScheme};
use crate::algorithm::Algorithm;
use crate::key::{KeyMaterial, SoftwareKey};

/// Required digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Group order `L`, little-endian.
const GROUP_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// Ed25519 signing and verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ed25519
    }

    fn generate(
        &self,
        rng: &mut dyn RngCore,
        exportable: bool,
    ) -> Result<SoftwareKey, CspError> {
        let seed = random_secret(rng)?;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        Ok(SoftwareKey::new(
            KeyMaterial::Ed25519Private(signing_key),
            exportable,
        ))
    }

    fn sign(&self, key: &SoftwareKey, digest: &Digest) -> Result<Signature, CspError> {
        let signing_key = match key.material() {
            KeyMaterial::Ed25519Private(sk) => sk,
            KeyMaterial::Ed25519Public(_) => {
                return Err(CspError::InvalidKeyUsage(
                    "Ed25519 public keys cannot sign".to_string(),
                ))
            }
            _ => return Err(wrong_scheme(self.algorithm(), key)),
        };
        check_digest_len(digest, DIGEST_LEN)?;
        let sig = signing_key.sign(digest.as_bytes());
        Ok(Signature::from_bytes(sig.to_bytes().to_vec()))
    }

    fn verify(
        &self,
        key: &SoftwareKey,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<bool, CspError> {
        let verifying_key = match key.material() {
            KeyMaterial::Ed25519Private(sk) => sk.verifying_key(),
            KeyMaterial::Ed25519Public(vk) => *vk,
            _ => return Err(wrong_scheme(self.algorithm(), key)),
        };
        check_digest_len(digest, DIGEST_LEN)?;
        let raw: [u8; SIGNATURE_LEN] = signature.as_bytes().try_into().map_err(|_| {
            CspError::MalformedSignature(format!(
                "Ed25519 signature must be {SIGNATURE_LEN} bytes, got {}",
                signature.len()
            ))
        })?;
        if !is_canonical_scalar(&raw[32..]) {
            return Err(CspError::MalformedSignature(
                "Ed25519 signature scalar is not reduced mod L".to_string(),
            ));
        }
        let sig = ed25519_dalek::Signature::from_bytes(&raw);
        Ok(verifying_key.verify(digest.as_bytes(), &sig).is_ok())
    }
}

/// `s < L`, comparing little-endian bytes from the most significant end.
fn is_canonical_scalar(s: &[u8]) -> bool {
    for (byte, order) in s.iter().rev().zip(GROUP_ORDER.iter().rev()) {
        if byte != order {
            return byte < order;
        }
    }
    false
}
