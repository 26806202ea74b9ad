//! # Scheme Registry
//!
//! Maps each enabled [`Algorithm`] to its [`SignatureScheme`]. The provider
//! resolves identifiers from `KeyGenOpts` and the algorithm of incoming keys
//! through this table, so disabling an algorithm in configuration removes it
//! from every operation at once.

use std::collections::BTreeMap;

use cryptohub_core::CspError;

use crate::algorithm::Algorithm;
use crate::scheme::{
    Aes256Scheme, EcdsaP256Scheme, Ed25519Scheme, HmacSha256Scheme, SignatureScheme,
};

/// Table of enabled schemes keyed by algorithm.
pub struct SchemeRegistry {
    schemes: BTreeMap<Algorithm, Box<dyn SignatureScheme>>,
}

impl SchemeRegistry {
    /// An empty registry. Every lookup fails until schemes are registered.
    pub fn empty() -> Self {
        Self {
            schemes: BTreeMap::new(),
        }
    }

    /// A registry with every built-in scheme.
    pub fn with_defaults() -> Self {
        Self::with_algorithms(&Algorithm::ALL)
    }

    /// A registry with the built-in schemes for `algorithms` only.
    pub fn with_algorithms(algorithms: &[Algorithm]) -> Self {
        let mut registry = Self::empty();
        for &algorithm in algorithms {
            registry.register(builtin(algorithm));
        }
        registry
    }

    /// Add or replace the scheme for its algorithm.
    pub fn register(&mut self, scheme: Box<dyn SignatureScheme>) {
        self.schemes.insert(scheme.algorithm(), scheme);
    }

    /// Look up the scheme for an algorithm.
    pub fn resolve(&self, algorithm: Algorithm) -> Result<&dyn SignatureScheme, CspError> {
        self.schemes
            .get(&algorithm)
            .map(|scheme| scheme.as_ref())
            .ok_or_else(|| {
                CspError::UnsupportedAlgorithm(format!("{algorithm} is not enabled"))
            })
    }

    /// Parse an identifier and look up its scheme.
    pub fn resolve_id(&self, id: &str) -> Result<&dyn SignatureScheme, CspError> {
        self.resolve(id.parse()?)
    }

    /// Enabled algorithms in stable order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.schemes.keys().copied().collect()
    }

    /// Whether `algorithm` is enabled.
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.schemes.contains_key(&algorithm)
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeRegistry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

fn builtin(algorithm: Algorithm) -> Box<dyn SignatureScheme> {
    match algorithm {
        Algorithm::Ed25519 => Box::new(Ed25519Scheme),
        Algorithm::EcdsaP256 => Box::new(EcdsaP256Scheme),
        Algorithm::HmacSha256 => Box::new(HmacSha256Scheme),
        Algorithm::Aes256 => Box::new(Aes256Scheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_algorithm() {
        let registry = SchemeRegistry::with_defaults();
        assert_eq!(registry.algorithms(), Algorithm::ALL.to_vec());
        for alg in Algorithm::ALL {
            assert_eq!(registry.resolve(alg).unwrap().algorithm(), alg);
        }
    }

    #[test]
    fn resolve_id_parses_identifier() {
        let registry = SchemeRegistry::with_defaults();
        let scheme = registry.resolve_id("ecdsa-p256").unwrap();
        assert_eq!(scheme.algorithm(), Algorithm::EcdsaP256);
    }

    #[test]
    fn unknown_identifier_is_unsupported() {
        let registry = SchemeRegistry::with_defaults();
        assert!(matches!(
            registry.resolve_id("SM2"),
            Err(CspError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn disabled_algorithm_is_unsupported() {
        let registry = SchemeRegistry::with_algorithms(&[Algorithm::Ed25519]);
        assert!(registry.contains(Algorithm::Ed25519));
        assert!(!registry.contains(Algorithm::HmacSha256));
        assert!(matches!(
            registry.resolve(Algorithm::HmacSha256),
            Err(CspError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = SchemeRegistry::empty();
        assert!(registry.algorithms().is_empty());
        assert!(registry.resolve(Algorithm::Ed25519).is_err());
    }

    #[test]
    fn register_adds_scheme() {
        let mut registry = SchemeRegistry::empty();
        registry.register(Box::new(HmacSha256Scheme));
        assert_eq!(registry.algorithms(), vec![Algorithm::HmacSha256]);
    }

    #[test]
    fn debug_lists_algorithms() {
        let registry = SchemeRegistry::with_algorithms(&[Algorithm::Aes256]);
        assert_eq!(
            format!("{registry:?}"),
            "SchemeRegistry { algorithms: [Aes256] }"
        );
    }
}
