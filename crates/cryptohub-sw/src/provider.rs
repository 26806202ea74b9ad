//! # Software CSP
//!
//! [`SoftwareCsp`] composes a [`SchemeRegistry`] and a [`KeyStore`] into a
//! provider implementing the `KeyGenerator`, `Signer`, and `Verifier` roles
//! for [`SoftwareKey`].
//!
//! ## Key Lifecycle
//!
//! - `key_gen` resolves the identifier, draws randomness from `OsRng`, and
//!   stores the key unless the options mark it ephemeral.
//! - `import_key` rebuilds a key from exported bytes.
//! - `get_key`, `delete_key`, `list_keys` pass through to the store.
//!
//! ## Security Invariant
//!
//! Log events carry the algorithm and SKI only. Key material never reaches
//! a log line or a `Debug` string.

use cryptohub_core::{
    CspError, Digest, Key, KeyBytes, KeyGenOpts, KeyGenerator, Signature, Signer, Ski, Verifier,
};
use rand_core::OsRng;

use crate::algorithm::Algorithm;
use crate::config::{ConfigError, CspConfig, KeyStoreKind};
use crate::key::{KeyClass, SoftwareKey};
use crate::keystore::{InMemoryKeyStore, KeyStore, NullKeyStore};
use crate::registry::SchemeRegistry;

/// In-process cryptographic service provider.
pub struct SoftwareCsp {
    registry: SchemeRegistry,
    keystore: Box<dyn KeyStore>,
}

impl SoftwareCsp {
    /// Every algorithm enabled, keys kept in memory.
    pub fn new() -> Self {
        Self::with_parts(SchemeRegistry::with_defaults(), Box::new(InMemoryKeyStore::new()))
    }

    /// Build a provider from configuration.
    pub fn from_config(config: &CspConfig) -> Self {
        let keystore: Box<dyn KeyStore> = match config.keystore {
            KeyStoreKind::Memory => Box::new(InMemoryKeyStore::new()),
            KeyStoreKind::None => Box::new(NullKeyStore),
        };
        Self::with_parts(SchemeRegistry::with_algorithms(&config.algorithms), keystore)
    }

    /// Build a provider from an explicit registry and store.
    pub fn with_parts(registry: SchemeRegistry, keystore: Box<dyn KeyStore>) -> Self {
        Self { registry, keystore }
    }

    /// Enabled algorithms in stable order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.registry.algorithms()
    }

    /// Name of the key store backend.
    pub fn keystore_name(&self) -> &str {
        self.keystore.name()
    }

    /// Rebuild a key from bytes produced by [`Key::to_bytes`].
    ///
    /// The key is returned, not stored; pass it to [`Self::store_key`] to
    /// keep it.
    pub fn import_key(
        &self,
        algorithm: Algorithm,
        class: KeyClass,
        bytes: &KeyBytes,
        exportable: bool,
    ) -> Result<SoftwareKey, CspError> {
        self.registry.resolve(algorithm)?;
        let key = SoftwareKey::from_bytes(algorithm, class, bytes, exportable)?;
        tracing::debug!(%algorithm, %class, ski = %key.ski(), "imported key");
        Ok(key)
    }

    /// Keep a key in the store and return its SKI.
    pub fn store_key(&self, key: SoftwareKey) -> Result<Ski, CspError> {
        self.registry.resolve(key.algorithm())?;
        self.keystore.store(key)
    }

    /// Fetch a stored key.
    pub fn get_key(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        self.keystore.get(ski)
    }

    /// Remove a stored key and return it.
    pub fn delete_key(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        let key = self.keystore.remove(ski)?;
        tracing::debug!(algorithm = %key.algorithm(), %ski, "deleted key");
        Ok(key)
    }

    /// SKIs of every stored key, sorted.
    pub fn list_keys(&self) -> Vec<Ski> {
        self.keystore.list()
    }
}

impl Default for SoftwareCsp {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SoftwareCsp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareCsp")
            .field("algorithms", &self.registry.algorithms())
            .field("keystore", &self.keystore.name())
            .field("stored_keys", &self.keystore.list().len())
            .finish()
    }
}

impl KeyGenerator<SoftwareKey> for SoftwareCsp {
    fn key_gen(&self, opts: &dyn KeyGenOpts) -> Result<SoftwareKey, CspError> {
        let scheme = self.registry.resolve_id(opts.algorithm())?;
        let key = scheme.generate(&mut OsRng, opts.exportable())?;
        let ski = key.ski();
        if !opts.ephemeral() {
            self.keystore.store(key.clone())?;
        }
        tracing::debug!(
            algorithm = %scheme.algorithm(),
            %ski,
            ephemeral = opts.ephemeral(),
            exportable = opts.exportable(),
            "generated key"
        );
        Ok(key)
    }
}

impl Signer<SoftwareKey> for SoftwareCsp {
    fn sign(&self, key: &SoftwareKey, digest: &Digest) -> Result<Signature, CspError> {
        let algorithm = key.algorithm();
        let signature = self.registry.resolve(algorithm)?.sign(key, digest)?;
        tracing::debug!(%algorithm, ski = %key.ski(), sig_len = signature.len(), "signed digest");
        Ok(signature)
    }
}

impl Verifier<SoftwareKey> for SoftwareCsp {
    fn verify(
        &self,
        key: &SoftwareKey,
        digest: &Digest,
        signature: &Signature,
    ) -> Result<bool, CspError> {
        let algorithm = key.algorithm();
        let valid = self
            .registry
            .resolve(algorithm)?
            .verify(key, digest, signature)?;
        tracing::debug!(%algorithm, ski = %key.ski(), valid, "verified signature");
        Ok(valid)
    }
}

/// Build a provider from `CRYPTOHUB_*` environment variables.
///
/// - `CRYPTOHUB_ALGORITHMS`: comma-separated identifiers (default: all).
/// - `CRYPTOHUB_KEYSTORE`: `memory` (default) or `none`.
pub fn create_csp_from_env() -> Result<SoftwareCsp, ConfigError> {
    let config = CspConfig::from_env()?;
    let csp = SoftwareCsp::from_config(&config);
    tracing::debug!(
        algorithms = ?csp.algorithms(),
        keystore = csp.keystore_name(),
        "software CSP configured"
    );
    Ok(csp)
}
