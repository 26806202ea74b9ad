//! # Software Keys
//!
//! [`SoftwareKey`] is a closed, tagged set of key variants. Dispatch over
//! schemes is a `match` on the variant; there is no runtime type inspection.
//!
//! ## Export Rules
//!
//! - Public keys always export.
//! - Private and secret keys export only when created exportable.
//!
//! | Variant        | Exported bytes                    |
//! |----------------|-----------------------------------|
//! | Ed25519 private| 32-byte seed                      |
//! | Ed25519 public | 32-byte compressed point          |
//! | P-256 private  | 32-byte big-endian scalar         |
//! | P-256 public   | 65-byte SEC1 uncompressed point   |
//! | HMAC / AES     | 32-byte secret                    |
//!
//! ## Capability Decisions
//!
//! - `public_key()` on a public key returns a copy of itself.
//! - `is_private()` is `true` for symmetric keys: they are secret material.

use cryptohub_core::{CspError, Key, KeyBytes, Ski};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::algorithm::Algorithm;

/// 32 bytes of secret material, zeroized on drop.
pub(crate) type Secret32 = Zeroizing<[u8; 32]>;

/// Which role a piece of key material plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyClass {
    /// Private half of an asymmetric pair.
    Private,
    /// Public half of an asymmetric pair.
    Public,
    /// Symmetric shared secret.
    Secret,
}

impl std::fmt::Display for KeyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private => f.write_str("private"),
            Self::Public => f.write_str("public"),
            Self::Secret => f.write_str("secret"),
        }
    }
}

/// Scheme-specific key material.
#[derive(Clone)]
pub(crate) enum KeyMaterial {
    Ed25519Private(ed25519_dalek::SigningKey),
    Ed25519Public(ed25519_dalek::VerifyingKey),
    EcdsaP256Private(p256::ecdsa::SigningKey),
    EcdsaP256Public(p256::ecdsa::VerifyingKey),
    HmacSha256(Secret32),
    Aes256(Secret32),
}

/// A key held by the software provider.
#[derive(Clone)]
pub struct SoftwareKey {
    material: KeyMaterial,
    exportable: bool,
}

impl SoftwareKey {
    pub(crate) fn new(material: KeyMaterial, exportable: bool) -> Self {
        Self {
            material,
            exportable,
        }
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Rebuild a key from bytes previously produced by [`Key::to_bytes`].
    ///
    /// Fails with [`CspError::InvalidKeyType`] when `class` does not fit the
    /// algorithm (e.g. a public AES key) and [`CspError::MalformedKey`] when
    /// the bytes are not valid material.
    pub fn from_bytes(
        algorithm: Algorithm,
        class: KeyClass,
        bytes: &KeyBytes,
        exportable: bool,
    ) -> Result<Self, CspError> {
        let raw = bytes.as_bytes();
        let material = match (algorithm, class) {
            (Algorithm::Ed25519, KeyClass::Private) => {
                let mut seed = secret32(algorithm, raw)?;
                let key = ed25519_dalek::SigningKey::from_bytes(&seed);
                seed.zeroize();
                KeyMaterial::Ed25519Private(key)
            }
            (Algorithm::Ed25519, KeyClass::Public) => {
                let point: [u8; 32] = raw.try_into().map_err(|_| {
                    CspError::MalformedKey(format!(
                        "Ed25519 public key must be 32 bytes, got {}",
                        raw.len()
                    ))
                })?;
                let key = ed25519_dalek::VerifyingKey::from_bytes(&point).map_err(|e| {
                    CspError::MalformedKey(format!("invalid Ed25519 public key: {e}"))
                })?;
                KeyMaterial::Ed25519Public(key)
            }
            (Algorithm::EcdsaP256, KeyClass::Private) => {
                let key = p256::ecdsa::SigningKey::from_slice(raw).map_err(|e| {
                    CspError::MalformedKey(format!("invalid P-256 private scalar: {e}"))
                })?;
                KeyMaterial::EcdsaP256Private(key)
            }
            (Algorithm::EcdsaP256, KeyClass::Public) => {
                let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(raw).map_err(|e| {
                    CspError::MalformedKey(format!("invalid P-256 public point: {e}"))
                })?;
                KeyMaterial::EcdsaP256Public(key)
            }
            (Algorithm::HmacSha256, KeyClass::Secret) => {
                KeyMaterial::HmacSha256(Zeroizing::new(secret32(algorithm, raw)?))
            }
            (Algorithm::Aes256, KeyClass::Secret) => {
                KeyMaterial::Aes256(Zeroizing::new(secret32(algorithm, raw)?))
            }
            (alg, class) => {
                return Err(CspError::InvalidKeyType(format!(
                    "{alg} has no {class} keys"
                )))
            }
        };
        Ok(Self::new(material, exportable))
    }

    /// The algorithm this key belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match &self.material {
            KeyMaterial::Ed25519Private(_) | KeyMaterial::Ed25519Public(_) => Algorithm::Ed25519,
            KeyMaterial::EcdsaP256Private(_) | KeyMaterial::EcdsaP256Public(_) => {
                Algorithm::EcdsaP256
            }
            KeyMaterial::HmacSha256(_) => Algorithm::HmacSha256,
            KeyMaterial::Aes256(_) => Algorithm::Aes256,
        }
    }

    /// The role of this key's material.
    pub fn class(&self) -> KeyClass {
        match &self.material {
            KeyMaterial::Ed25519Private(_) | KeyMaterial::EcdsaP256Private(_) => KeyClass::Private,
            KeyMaterial::Ed25519Public(_) | KeyMaterial::EcdsaP256Public(_) => KeyClass::Public,
            KeyMaterial::HmacSha256(_) | KeyMaterial::Aes256(_) => KeyClass::Secret,
        }
    }

    /// Whether `to_bytes` will release private or secret material.
    pub fn is_exportable(&self) -> bool {
        self.exportable || self.class() == KeyClass::Public
    }

    fn public_point(&self) -> Option<Vec<u8>> {
        match &self.material {
            KeyMaterial::Ed25519Private(sk) => Some(sk.verifying_key().to_bytes().to_vec()),
            KeyMaterial::Ed25519Public(vk) => Some(vk.to_bytes().to_vec()),
            KeyMaterial::EcdsaP256Private(sk) => Some(sec1_uncompressed(sk.verifying_key())),
            KeyMaterial::EcdsaP256Public(vk) => Some(sec1_uncompressed(vk)),
            KeyMaterial::HmacSha256(_) | KeyMaterial::Aes256(_) => None,
        }
    }
}

fn sec1_uncompressed(vk: &p256::ecdsa::VerifyingKey) -> Vec<u8> {
    vk.to_encoded_point(false).as_bytes().to_vec()
}

fn secret32(algorithm: Algorithm, raw: &[u8]) -> Result<[u8; 32], CspError> {
    raw.try_into().map_err(|_| {
        CspError::MalformedKey(format!(
            "{algorithm} key material must be 32 bytes, got {}",
            raw.len()
        ))
    })
}

impl Key for SoftwareKey {
    fn to_bytes(&self) -> Result<KeyBytes, CspError> {
        if !self.is_exportable() {
            return Err(CspError::ExportDenied(format!(
                "{} {} key is not exportable",
                self.algorithm(),
                self.class()
            )));
        }
        let bytes = match &self.material {
            KeyMaterial::Ed25519Private(sk) => {
                let mut seed = sk.to_bytes();
                let bytes = KeyBytes::from_slice(&seed);
                seed.zeroize();
                bytes
            }
            KeyMaterial::EcdsaP256Private(sk) => KeyBytes::from_slice(&sk.to_bytes()),
            KeyMaterial::HmacSha256(secret) | KeyMaterial::Aes256(secret) => {
                KeyBytes::from_slice(secret.as_slice())
            }
            KeyMaterial::Ed25519Public(_) | KeyMaterial::EcdsaP256Public(_) => {
                KeyBytes::new(self.public_point().unwrap_or_default())
            }
        };
        Ok(bytes)
    }

    fn is_symmetric(&self) -> bool {
        self.class() == KeyClass::Secret
    }

    fn is_private(&self) -> bool {
        self.class() != KeyClass::Public
    }

    fn public_key(&self) -> Result<Self, CspError> {
        let material = match &self.material {
            KeyMaterial::Ed25519Private(sk) => KeyMaterial::Ed25519Public(sk.verifying_key()),
            KeyMaterial::EcdsaP256Private(sk) => {
                KeyMaterial::EcdsaP256Public(*sk.verifying_key())
            }
            KeyMaterial::Ed25519Public(_) | KeyMaterial::EcdsaP256Public(_) => {
                return Ok(self.clone())
            }
            KeyMaterial::HmacSha256(_) | KeyMaterial::Aes256(_) => {
                return Err(CspError::InvalidKeyType(format!(
                    "{} is a symmetric scheme and has no public key",
                    self.algorithm()
                )))
            }
        };
        Ok(Self::new(material, true))
    }

    fn ski(&self) -> Ski {
        match (&self.material, self.public_point()) {
            (_, Some(point)) => Ski::compute(&[&point]),
            (KeyMaterial::HmacSha256(secret) | KeyMaterial::Aes256(secret), None) => {
                Ski::compute(&[self.algorithm().as_str().as_bytes(), &[0x00], secret.as_slice()])
            }
            (_, None) => Ski::compute(&[self.algorithm().as_str().as_bytes()]),
        }
    }
}

impl std::fmt::Debug for SoftwareKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareKey")
            .field("algorithm", &self.algorithm())
            .field("class", &self.class())
            .field("exportable", &self.is_exportable())
            .field("ski", &self.ski())
            .finish()
    }
}
