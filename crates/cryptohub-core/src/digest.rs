//! # Digest: Pre-Hashed Message Input
//!
//! Signing and verification in every provider operate on a [`Digest`], never
//! on a raw message. Choosing and applying the hash is the caller's job; the
//! provider only checks that the digest has the length its scheme expects.
//!
//! ## Serde
//!
//! Digests serialize/deserialize as lowercase hex strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use crate::error::CspError;

/// A message digest handed to `sign`/`verify`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// Wrap digest bytes computed elsewhere.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Hash `data` with SHA-256.
    pub fn sha256(data: &[u8]) -> Self {
        use sha2::Digest as _;
        Self(Sha256::digest(data).to_vec())
    }

    /// Return the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length digest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a digest from a hex string. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self, CspError> {
        Ok(Self(hex::decode(s.trim())?))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256("abc"), FIPS 180-2 appendix B.1.
        let digest = Digest::sha256(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.len(), 32);
    }

    #[test]
    fn sha256_empty_input() {
        let digest = Digest::sha256(b"");
        assert_eq!(
            digest.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn from_hex_trims_whitespace() {
        let digest = Digest::from_hex("  00ff\n").unwrap();
        assert_eq!(digest.as_bytes(), &[0x00, 0xff]);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Digest::from_hex("not-hex"),
            Err(CspError::HexDecode(_))
        ));
        assert!(Digest::from_hex("abc").is_err());
    }

    #[test]
    fn serde_as_hex_string() {
        let digest = Digest::sha256(b"serde");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", digest.to_hex()));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    #[test]
    fn empty_digest() {
        let digest = Digest::from_bytes(Vec::new());
        assert!(digest.is_empty());
        assert_eq!(format!("{digest}"), "");
    }
}
