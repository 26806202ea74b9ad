//! # Algorithm Identifiers
//!
//! The closed set of algorithms the software provider implements. Parsing an
//! identifier is ASCII case-insensitive; anything else is
//! [`CspError::UnsupportedAlgorithm`].

use std::str::FromStr;

use cryptohub_core::CspError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Algorithms supported by the software provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// Ed25519 signatures over a 32-byte digest.
    Ed25519,
    /// ECDSA over NIST P-256 with a 32-byte prehash, RFC 6979 nonces.
    EcdsaP256,
    /// HMAC-SHA256 tags over a 32-byte digest.
    HmacSha256,
    /// AES-256 secret keys. Generation and storage only.
    Aes256,
}

impl Algorithm {
    /// Every algorithm, in registry order.
    pub const ALL: [Algorithm; 4] = [
        Self::Ed25519,
        Self::EcdsaP256,
        Self::HmacSha256,
        Self::Aes256,
    ];

    /// Returns the canonical identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::EcdsaP256 => "ECDSA-P256",
            Self::HmacSha256 => "HMAC-SHA256",
            Self::Aes256 => "AES-256",
        }
    }

    /// True for shared-secret algorithms.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::HmacSha256 | Self::Aes256)
    }

    /// Whether keys of this algorithm can sign and verify.
    pub fn can_sign(&self) -> bool {
        !matches!(self, Self::Aes256)
    }

    /// Required digest length for signing, or `None` if the algorithm does
    /// not sign.
    pub fn digest_len(&self) -> Option<usize> {
        match self {
            Self::Ed25519 | Self::EcdsaP256 | Self::HmacSha256 => Some(32),
            Self::Aes256 => None,
        }
    }
}

impl FromStr for Algorithm {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CspError::UnsupportedAlgorithm(s.to_string()))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_identifiers() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.as_str().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ed25519".parse::<Algorithm>().unwrap(), Algorithm::Ed25519);
        assert_eq!(
            "ecdsa-p256".parse::<Algorithm>().unwrap(),
            Algorithm::EcdsaP256
        );
        assert_eq!(" aes-256 ".parse::<Algorithm>().unwrap(), Algorithm::Aes256);
    }

    #[test]
    fn parse_unknown_is_unsupported() {
        let err = "RSA-2048".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, CspError::UnsupportedAlgorithm("RSA-2048".to_string()));
    }

    #[test]
    fn symmetric_classification() {
        assert!(!Algorithm::Ed25519.is_symmetric());
        assert!(!Algorithm::EcdsaP256.is_symmetric());
        assert!(Algorithm::HmacSha256.is_symmetric());
        assert!(Algorithm::Aes256.is_symmetric());
    }

    #[test]
    fn aes_does_not_sign() {
        assert!(!Algorithm::Aes256.can_sign());
        assert_eq!(Algorithm::Aes256.digest_len(), None);
        assert_eq!(Algorithm::HmacSha256.digest_len(), Some(32));
    }

    #[test]
    fn serde_uses_identifier() {
        let json = serde_json::to_string(&Algorithm::HmacSha256).unwrap();
        assert_eq!(json, "\"HMAC-SHA256\"");
        let back: Algorithm = serde_json::from_str("\"hmac-sha256\"").unwrap();
        assert_eq!(back, Algorithm::HmacSha256);
        assert!(serde_json::from_str::<Algorithm>("\"DSA\"").is_err());
    }
}
