//! # Key-Generation Options
//!
//! [`KeyGenOpts`] names the algorithm a provider should generate. The
//! identifier is resolved by the provider's registry; nothing here validates
//! it.

/// Options for [`KeyGenerator::key_gen`](crate::KeyGenerator::key_gen).
pub trait KeyGenOpts {
    /// Algorithm identifier, e.g. `"Ed25519"` or `"AES-256"`.
    fn algorithm(&self) -> &str;

    /// Whether the generated key may be serialized with `to_bytes`.
    fn exportable(&self) -> bool {
        false
    }

    /// Whether the provider should forget the key once returned.
    ///
    /// Non-ephemeral keys are kept in the provider's key store.
    fn ephemeral(&self) -> bool {
        true
    }
}

/// Provider-agnostic key-generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenOptions {
    algorithm: String,
    exportable: bool,
    ephemeral: bool,
}

impl KeyGenOptions {
    /// Options for `algorithm`: non-exportable and ephemeral.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            exportable: false,
            ephemeral: true,
        }
    }

    /// Allow or deny serialization of the generated key.
    pub fn with_exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    /// Ask the provider to keep (`false`) or forget (`true`) the key.
    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

impl KeyGenOpts for KeyGenOptions {
    fn algorithm(&self) -> &str {
        &self.algorithm
    }

    fn exportable(&self) -> bool {
        self.exportable
    }

    fn ephemeral(&self) -> bool {
        self.ephemeral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareOpts;

    impl KeyGenOpts for BareOpts {
        fn algorithm(&self) -> &str {
            "Ed25519"
        }
    }

    #[test]
    fn trait_defaults() {
        let opts = BareOpts;
        assert_eq!(opts.algorithm(), "Ed25519");
        assert!(!opts.exportable());
        assert!(opts.ephemeral());
    }

    #[test]
    fn builder_sets_flags() {
        let opts = KeyGenOptions::new("ECDSA-P256")
            .with_exportable(true)
            .with_ephemeral(false);
        assert_eq!(opts.algorithm(), "ECDSA-P256");
        assert!(opts.exportable());
        assert!(!opts.ephemeral());
    }

    #[test]
    fn new_defaults_match_trait_defaults() {
        let opts = KeyGenOptions::new("AES-256");
        assert!(!opts.exportable());
        assert!(opts.ephemeral());
    }
}
