//! # HMAC-SHA256 Scheme
//!
//! Symmetric "signatures": a 32-byte HMAC-SHA256 tag over the digest. The
//! same key signs and verifies. Tag comparison is constant time.

use cryptohub_core::{CspError, Digest, Signature};
use hmac::{Hmac, Mac};
use rand_core::RngCore;
use sha2::Sha256;

use super::{check_digest_len, random_secret, wrong_scheme, SignatureScheme};
use crate::algorithm::Algorithm;
use crate::key::{KeyMaterial, Secret32, SoftwareKey};

type HmacSha256 = Hmac<Sha256>;

/// Required digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Tag length in bytes.
pub const TAG_LEN: usize = 32;

/// HMAC-SHA256 tagging and tag verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Scheme;

impl HmacSha256Scheme {
    fn secret<'k>(&self, key: &'k SoftwareKey) -> Result<&'k Secret32, CspError> {
        match key.material() {
            KeyMaterial::HmacSha256(secret) => Ok(secret),
            _ => Err(wrong_scheme(self.algorithm(), key)),
        }
    }

    fn mac(secret: &Secret32, digest: &Digest) -> Result<HmacSha256, CspError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_slice())
            .map_err(|e| CspError::InvalidKeyUsage(format!("HMAC key rejected: {e}")))?;
        mac.update(digest.as_bytes());
        Ok(mac)
    }
}

impl SignatureScheme for HmacSha256Scheme {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HmacSha256
    }

    fn generate(
        &self,
        rng: &mut dyn RngCore,
        exportable: bool,
    ) -> Result<SoftwareKey, CspError> {
        let secret = random_secret(rng)?;
        Ok(SoftwareKey::new(KeyMaterial::HmacSha256(secret), exportable))
    }

    fn sign(&self, key: &SoftwareKey, digest: &Digest) -> Result<Signature, CspError> {
        let secret = self.secret(key)?;
        check_digest_len(digest, DIGEST_LEN)?;
        let tag = Self::mac(secret, digest)?.finalize().into_bytes();
        Ok(Signature::from_bytes(tag.to_vec()))
    }

    fn verify(
        &self,
        key: &SoftwareKey,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<bool, CspError> {
        let secret = self.secret(key)?;
        check_digest_len(digest, DIGEST_LEN)?;
        if signature.len() != TAG_LEN {
            return Err(CspError::MalformedSignature(format!(
                "HMAC-SHA256 tag must be {TAG_LEN} bytes, got {}",
                signature.len()
            )));
        }
        Ok(Self::mac(secret, digest)?
            .verify_slice(signature.as_bytes())
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyClass;
    use cryptohub_core::KeyBytes;

    fn key_from(secret: &[u8]) -> SoftwareKey {
        SoftwareKey::from_bytes(
            Algorithm::HmacSha256,
            KeyClass::Secret,
            &KeyBytes::from_slice(secret),
            false,
        )
        .unwrap()
    }

    #[test]
    fn tag_is_hmac_of_digest() {
        let key = key_from(&[0x0b; 32]);
        let digest = Digest::from_bytes(vec![0u8; 32]);
        let tag = HmacSha256Scheme.sign(&key, &digest).unwrap();
        assert_eq!(tag.len(), TAG_LEN);
        let recomputed = {
            let mut mac = HmacSha256::new_from_slice(&[0x0b; 32]).unwrap();
            mac.update(&[0u8; 32]);
            mac.finalize().into_bytes().to_vec()
        };
        assert_eq!(tag.as_bytes(), recomputed.as_slice());
    }

    #[test]
    fn same_key_verifies() {
        let key = key_from(&[0x42; 32]);
        let digest = Digest::sha256(b"payload");
        let tag = HmacSha256Scheme.sign(&key, &digest).unwrap();
        assert!(HmacSha256Scheme.verify(&key, &digest, &tag).unwrap());
    }

    #[test]
    fn different_key_is_false() {
        let digest = Digest::sha256(b"payload");
        let tag = HmacSha256Scheme
            .sign(&key_from(&[1; 32]), &digest)
            .unwrap();
        assert!(!HmacSha256Scheme
            .verify(&key_from(&[2; 32]), &digest, &tag)
            .unwrap());
    }

    #[test]
    fn truncated_tag_is_malformed() {
        let key = key_from(&[1; 32]);
        let digest = Digest::sha256(b"payload");
        let tag = Signature::from_bytes(vec![0u8; 16]);
        assert!(matches!(
            HmacSha256Scheme.verify(&key, &digest, &tag),
            Err(CspError::MalformedSignature(_))
        ));
    }

    #[test]
    fn wrong_digest_length() {
        let key = key_from(&[1; 32]);
        assert!(matches!(
            HmacSha256Scheme.sign(&key, &Digest::from_bytes(vec![0u8; 64])),
            Err(CspError::InvalidDigestLength { expected: 32, actual: 64 })
        ));
    }
}
