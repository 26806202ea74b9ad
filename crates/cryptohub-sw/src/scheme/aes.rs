//! # AES-256 Keys
//!
//! AES-256 secrets can be generated, exported, and stored, but this
//! provider has no encryption role, so `sign` and `verify` always fail with
//! [`CspError::InvalidKeyUsage`].

use cryptohub_core::{CspError, Digest, Signature};
use rand_core::RngCore;

use super::{random_secret, wrong_scheme, SignatureScheme};
use crate::algorithm::Algorithm;
use crate::key::{KeyMaterial, SoftwareKey};

/// AES-256 key generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256Scheme;

impl Aes256Scheme {
    fn refuse(&self, key: &SoftwareKey, op: &str) -> CspError {
        match key.material() {
            KeyMaterial::Aes256(_) => CspError::InvalidKeyUsage(format!(
                "AES-256 keys are encryption keys and cannot {op}"
            )),
            _ => wrong_scheme(self.algorithm(), key),
        }
    }
}

impl SignatureScheme for Aes256Scheme {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Aes256
    }

    fn generate(
        &self,
        rng: &mut dyn RngCore,
        exportable: bool,
    ) -> Result<SoftwareKey, CspError> {
        let secret = random_secret(rng)?;
        Ok(SoftwareKey::new(KeyMaterial::Aes256(secret), exportable))
    }

    fn sign(&self, key: &SoftwareKey, _digest: &Digest) -> Result<Signature, CspError> {
        Err(self.refuse(key, "sign"))
    }

    fn verify(
        &self,
        key: &SoftwareKey,
        _digest: &Digest,
        _signature: &Signature,
    ) -> Result<bool, CspError> {
        Err(self.refuse(key, "verify"))
    }
}
