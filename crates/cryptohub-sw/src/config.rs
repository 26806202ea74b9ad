//! Software provider configuration.
//!
//! Selects which algorithms the provider enables and where non-ephemeral
//! keys are kept. Defaults enable every algorithm with an in-memory store.
//! Override via environment variables or explicit construction.

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;

/// Comma-separated algorithm identifiers to enable.
pub const ALGORITHMS_VAR: &str = "CRYPTOHUB_ALGORITHMS";

/// Key store backend: `memory` or `none`.
pub const KEYSTORE_VAR: &str = "CRYPTOHUB_KEYSTORE";

/// Key store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStoreKind {
    /// [`crate::InMemoryKeyStore`].
    #[default]
    Memory,
    /// [`crate::NullKeyStore`]: non-ephemeral keys are not kept.
    None,
}

impl std::fmt::Display for KeyStoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::None => f.write_str("none"),
        }
    }
}

impl std::str::FromStr for KeyStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "none" => Ok(Self::None),
            other => Err(format!("unknown key store {other:?} (expected: memory, none)")),
        }
    }
}

/// Provider configuration.
///
/// Deserialization applies the same checks as [`CspConfig::from_lookup`]:
/// duplicates are dropped and an empty algorithm list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCspConfig")]
pub struct CspConfig {
    /// Algorithms the provider resolves. Anything else is unsupported.
    pub algorithms: Vec<Algorithm>,
    /// Where non-ephemeral keys go.
    pub keystore: KeyStoreKind,
}

impl Default for CspConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            keystore: KeyStoreKind::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawCspConfig {
    algorithms: Vec<Algorithm>,
    keystore: KeyStoreKind,
}

impl Default for RawCspConfig {
    fn default() -> Self {
        let CspConfig {
            algorithms,
            keystore,
        } = CspConfig::default();
        Self {
            algorithms,
            keystore,
        }
    }
}

impl TryFrom<RawCspConfig> for CspConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCspConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            algorithms: dedup_enabled(raw.algorithms)?,
            keystore: raw.keystore,
        })
    }
}

impl CspConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CRYPTOHUB_ALGORITHMS` (default: every algorithm)
    /// - `CRYPTOHUB_KEYSTORE` (default: `memory`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ALGORITHMS_VAR) {
            config.algorithms = parse_algorithms(&raw)?;
        }
        if let Some(raw) = lookup(KEYSTORE_VAR) {
            config.keystore = raw.parse().map_err(|reason| ConfigError::Invalid {
                var: KEYSTORE_VAR,
                reason,
            })?;
        }
        Ok(config)
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse().map_err(|e| ConfigError::Invalid {
                var: ALGORITHMS_VAR,
                reason: format!("{e}"),
            })
        })
        .collect::<Result<Vec<Algorithm>, _>>()?;
    dedup_enabled(algorithms)
}

/// Drop repeats, keeping first-seen order. At least one must remain.
fn dedup_enabled(listed: Vec<Algorithm>) -> Result<Vec<Algorithm>, ConfigError> {
    let mut algorithms = Vec::with_capacity(listed.len());
    for algorithm in listed {
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }
    if algorithms.is_empty() {
        return Err(ConfigError::NoAlgorithms);
    }
    Ok(algorithms)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("no algorithms enabled")]
    NoAlgorithms,
}
