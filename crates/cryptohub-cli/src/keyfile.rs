//! # Key Files
//!
//! The CLI persists keys as small JSON documents:
//!
//! ```json
//! {"algorithm": "Ed25519", "class": "private", "material": "<hex>", "ski": "<hex>"}
//! ```
//!
//! This is a CLI-local format, not an interchange standard. The stored SKI
//! is checked against the material on load so a hand-edited file fails
//! loudly instead of signing under the wrong identity.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use cryptohub_core::{Key, KeyBytes, Ski};
use cryptohub_sw::{Algorithm, KeyClass, SoftwareCsp, SoftwareKey};

/// On-disk form of a [`SoftwareKey`].
///
/// Custom `Debug` redacts `material`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    pub algorithm: Algorithm,
    pub class: KeyClass,
    /// Exported key bytes, lowercase hex.
    pub material: String,
    pub ski: Ski,
}

impl std::fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyFile")
            .field("algorithm", &self.algorithm)
            .field("class", &self.class)
            .field("material", &"[REDACTED]")
            .field("ski", &self.ski)
            .finish()
    }
}

impl KeyFile {
    /// Capture an exportable key.
    pub fn from_key(key: &SoftwareKey) -> Result<Self> {
        let bytes = key
            .to_bytes()
            .with_context(|| format!("cannot write {} {} key", key.algorithm(), key.class()))?;
        Ok(Self {
            algorithm: key.algorithm(),
            class: key.class(),
            material: bytes.to_hex(),
            ski: key.ski(),
        })
    }

    /// Rebuild the key through `csp`. The result stays exportable.
    pub fn to_key(&self, csp: &SoftwareCsp) -> Result<SoftwareKey> {
        let bytes = KeyBytes::from_hex(&self.material).context("invalid key material hex")?;
        let key = csp
            .import_key(self.algorithm, self.class, &bytes, true)
            .with_context(|| format!("invalid {} {} key", self.algorithm, self.class))?;
        if key.ski() != self.ski {
            bail!(
                "key file SKI {} does not match key material (computed {})",
                self.ski,
                key.ski()
            );
        }
        Ok(key)
    }

    /// Read and parse a key file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("key file not found: {}", path.display());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read key file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse key file: {}", path.display()))
    }

    /// Write the key file as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self).context("failed to encode key file")?;
        json.push('\n');
        std::fs::write(path, json)
            .with_context(|| format!("failed to write key file: {}", path.display()))
    }
}

/// Load a key file and rebuild its key.
pub fn load_key(path: &Path, csp: &SoftwareCsp) -> Result<SoftwareKey> {
    KeyFile::load(path)?.to_key(csp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptohub_core::{KeyGenOptions, KeyGenerator};

    fn exportable(csp: &SoftwareCsp, id: &str) -> SoftwareKey {
        csp.key_gen(&KeyGenOptions::new(id).with_exportable(true))
            .unwrap()
    }

    #[test]
    fn save_and_load_preserve_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        let csp = SoftwareCsp::new();
        let key = exportable(&csp, "ECDSA-P256");

        KeyFile::from_key(&key).unwrap().save(&path).unwrap();
        let loaded = load_key(&path, &csp).unwrap();
        assert_eq!(loaded.ski(), key.ski());
        assert_eq!(loaded.class(), KeyClass::Private);
    }

    #[test]
    fn json_shape() {
        let csp = SoftwareCsp::new();
        let file = KeyFile::from_key(&exportable(&csp, "HMAC-SHA256")).unwrap();
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["algorithm"], "HMAC-SHA256");
        assert_eq!(value["class"], "secret");
        assert_eq!(value["material"].as_str().unwrap().len(), 64);
        assert_eq!(value["ski"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn non_exportable_key_cannot_be_written() {
        let csp = SoftwareCsp::new();
        let key = csp.key_gen(&KeyGenOptions::new("Ed25519")).unwrap();
        let err = KeyFile::from_key(&key).unwrap_err();
        assert!(format!("{err:#}").contains("not exportable"));
    }

    #[test]
    fn tampered_ski_is_rejected() {
        let csp = SoftwareCsp::new();
        let mut file = KeyFile::from_key(&exportable(&csp, "Ed25519")).unwrap();
        file.ski = Ski::compute(&[b"someone else"]);
        let err = file.to_key(&csp).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = KeyFile::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("key file not found"));
    }

    #[test]
    fn debug_redacts_material() {
        let csp = SoftwareCsp::new();
        let file = KeyFile::from_key(&exportable(&csp, "AES-256")).unwrap();
        let debug = format!("{file:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&file.material));
    }
}
