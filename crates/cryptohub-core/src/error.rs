//! # Error Types: CSP Error Taxonomy
//!
//! One error enum for every provider operation. All variants use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every operation surfaces failures directly to its caller. There is no
//!   retry or suppression at this layer.
//! - A signature that is well-formed but does not match is NOT an error;
//!   `verify` reports it as `Ok(false)`.
//! - Messages never contain key material.

use thiserror::Error;

/// Errors returned by key capabilities and provider roles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CspError {
    /// Key material cannot be serialized (non-exportable key or scheme
    /// forbids it).
    #[error("key export denied: {0}")]
    ExportDenied(String),

    /// Operation not applicable to this key's symmetric/asymmetric class.
    #[error("invalid key type: {0}")]
    InvalidKeyType(String),

    /// Key lacks the role the operation needs (e.g. signing with a public key).
    #[error("invalid key usage: {0}")]
    InvalidKeyUsage(String),

    /// Algorithm identifier not implemented or not enabled by this provider.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Digest length does not match the scheme's expected size.
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidDigestLength {
        /// Length the scheme requires.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Signature bytes are not a valid encoding for the scheme.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Imported key bytes are not valid material for the scheme.
    #[error("malformed key material: {0}")]
    MalformedKey(String),

    /// Randomness or hardware fault during key generation.
    #[error("key generation failed: {0}")]
    GenerationFailure(String),

    /// No key with the given identifier in the provider's key store.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Hex decoding of a digest, signature, or key failed.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}

impl From<hex::FromHexError> for CspError {
    fn from(err: hex::FromHexError) -> Self {
        Self::HexDecode(err.to_string())
    }
}
