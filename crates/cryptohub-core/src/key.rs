//! # Key Capability
//!
//! A [`Key`] is an opaque handle to key material. Callers learn about it only
//! through capability queries; the material itself is reachable through
//! [`Key::to_bytes`], which a provider may refuse.
//!
//! ## Security Invariant
//!
//! - [`KeyBytes`] zeroizes its buffer on drop, compares in constant time, and
//!   never prints its contents through `Debug`.
//! - [`Ski`] identifies a key without revealing it. Both halves of an
//!   asymmetric pair share one SKI.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::CspError;

/// Capability contract for key material.
///
/// Implementations must be `Send + Sync`; every accessor may be called from
/// concurrent contexts.
pub trait Key: Send + Sync {
    /// Serialize the key material, if the key allows it.
    ///
    /// Fails with [`CspError::ExportDenied`] for non-exportable keys or when
    /// the scheme forbids serialization.
    fn to_bytes(&self) -> Result<KeyBytes, CspError>;

    /// True for shared-secret schemes, false for public/private schemes.
    fn is_symmetric(&self) -> bool;

    /// True for the private half of an asymmetric pair.
    ///
    /// The value for symmetric keys is implementation-defined; callers must
    /// not rely on it.
    fn is_private(&self) -> bool;

    /// Return the public counterpart of an asymmetric key.
    ///
    /// Fails with [`CspError::InvalidKeyType`] for symmetric keys. Providers
    /// document what happens for an already-public key.
    fn public_key(&self) -> Result<Self, CspError>
    where
        Self: Sized;

    /// Subject key identifier.
    fn ski(&self) -> Ski;
}

// ---------------------------------------------------------------------------
// KeyBytes
// ---------------------------------------------------------------------------

/// Serialized key material.
///
/// The buffer is zeroized on drop. Equality runs in constant time over the
/// contents.
#[derive(Clone)]
pub struct KeyBytes(Zeroizing<Vec<u8>>);

impl KeyBytes {
    /// Take ownership of serialized key material.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Copy key material from a slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no material is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as lowercase hex. The returned string is not zeroized.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_slice())
    }

    /// Parse key material from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, CspError> {
        Ok(Self::new(hex::decode(s.trim())?))
    }
}

impl PartialEq for KeyBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for KeyBytes {}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyBytes(<{} bytes>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Ski
// ---------------------------------------------------------------------------

/// Subject key identifier: a SHA-256 value naming a key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ski([u8; 32]);

impl Ski {
    /// Wrap a precomputed identifier.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash the concatenation of `parts` into an identifier.
    pub fn compute(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// Return the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CspError> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut out)?;
        Ok(Self(out))
    }
}

impl Serialize for Ski {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ski {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ski {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ski({}...)", &self.to_hex()[..8])
    }
}

impl std::fmt::Display for Ski {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
