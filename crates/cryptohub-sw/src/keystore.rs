//! # Key Store
//!
//! Where the provider keeps non-ephemeral keys, addressed by SKI.
//!
//! - [`InMemoryKeyStore`]: a `RwLock`-guarded map. Keys die with the process.
//! - [`NullKeyStore`]: keeps nothing. Every lookup misses.
//!
//! Both halves of an asymmetric pair share one SKI. Storing a public key
//! under an SKI that already holds the private half keeps the private half.

use std::collections::HashMap;

use cryptohub_core::{CspError, Key, Ski};
use parking_lot::RwLock;

use crate::key::SoftwareKey;

/// Storage backend for provider-held keys.
///
/// All methods take `&self`; implementations synchronize internally.
pub trait KeyStore: Send + Sync {
    /// Keep `key` and return its SKI.
    fn store(&self, key: SoftwareKey) -> Result<Ski, CspError>;

    /// Fetch a copy of the key with this SKI.
    fn get(&self, ski: &Ski) -> Result<SoftwareKey, CspError>;

    /// Forget the key with this SKI and return it.
    fn remove(&self, ski: &Ski) -> Result<SoftwareKey, CspError>;

    /// SKIs of every stored key, sorted.
    fn list(&self) -> Vec<Ski>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Process-memory key store.
#[derive(Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<Ski, SoftwareKey>>,
}

impl InMemoryKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn store(&self, key: SoftwareKey) -> Result<Ski, CspError> {
        let ski = key.ski();
        let mut keys = self.keys.write();
        let keep_existing = !key.is_private()
            && keys.get(&ski).is_some_and(|existing| existing.is_private());
        if !keep_existing {
            keys.insert(ski, key);
        }
        Ok(ski)
    }

    fn get(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        self.keys
            .read()
            .get(ski)
            .cloned()
            .ok_or_else(|| CspError::KeyNotFound(ski.to_hex()))
    }

    fn remove(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        self.keys
            .write()
            .remove(ski)
            .ok_or_else(|| CspError::KeyNotFound(ski.to_hex()))
    }

    fn list(&self) -> Vec<Ski> {
        let mut skis: Vec<Ski> = self.keys.read().keys().copied().collect();
        skis.sort();
        skis
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyStore")
            .field("key_count", &self.len())
            .finish()
    }
}

/// A key store that keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullKeyStore;

impl KeyStore for NullKeyStore {
    fn store(&self, key: SoftwareKey) -> Result<Ski, CspError> {
        Ok(key.ski())
    }

    fn get(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        Err(CspError::KeyNotFound(ski.to_hex()))
    }

    fn remove(&self, ski: &Ski) -> Result<SoftwareKey, CspError> {
        Err(CspError::KeyNotFound(ski.to_hex()))
    }

    fn list(&self) -> Vec<Ski> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::test_rng::CountingRng;
    use crate::scheme::{Ed25519Scheme, HmacSha256Scheme, SignatureScheme};

    fn ed25519(seed: u64) -> SoftwareKey {
        Ed25519Scheme
            .generate(&mut CountingRng(seed), false)
            .unwrap()
    }

    #[test]
    fn store_and_get() {
        let store = InMemoryKeyStore::new();
        let key = ed25519(1);
        let ski = store.store(key.clone()).unwrap();
        assert_eq!(ski, key.ski());
        assert_eq!(store.get(&ski).unwrap().ski(), ski);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_key_not_found() {
        let store = InMemoryKeyStore::new();
        let ski = Ski::compute(&[b"missing"]);
        assert!(matches!(store.get(&ski), Err(CspError::KeyNotFound(_))));
    }

    #[test]
    fn public_does_not_replace_private() {
        let store = InMemoryKeyStore::new();
        let private = ed25519(2);
        let public = private.public_key().unwrap();
        store.store(private).unwrap();
        let ski = store.store(public).unwrap();
        assert!(store.get(&ski).unwrap().is_private());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn private_replaces_public() {
        let store = InMemoryKeyStore::new();
        let private = ed25519(3);
        store.store(private.public_key().unwrap()).unwrap();
        let ski = store.store(private).unwrap();
        assert!(store.get(&ski).unwrap().is_private());
    }

    #[test]
    fn remove_forgets_key() {
        let store = InMemoryKeyStore::new();
        let ski = store.store(ed25519(4)).unwrap();
        assert!(store.remove(&ski).is_ok());
        assert!(store.is_empty());
        assert!(matches!(store.remove(&ski), Err(CspError::KeyNotFound(_))));
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryKeyStore::new();
        for seed in 10..15 {
            store.store(ed25519(seed)).unwrap();
        }
        store
            .store(HmacSha256Scheme.generate(&mut CountingRng(20), false).unwrap())
            .unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 6);
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn null_store_keeps_nothing() {
        let store = NullKeyStore;
        let key = ed25519(5);
        let ski = store.store(key).unwrap();
        assert!(matches!(store.get(&ski), Err(CspError::KeyNotFound(_))));
        assert!(store.list().is_empty());
        assert_eq!(store.name(), "none");
    }

    #[test]
    fn stores_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryKeyStore>();
        assert_send_sync::<NullKeyStore>();
    }

    #[test]
    fn trait_object_safe() {
        let _boxed: Box<dyn KeyStore> = Box::new(InMemoryKeyStore::new());
    }
}
