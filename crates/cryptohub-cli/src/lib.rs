//! # cryptohub-cli: CLI Tool for cryptohub
//!
//! Provides the `cryptohub` command-line interface over the software CSP.
//!
//! ## Subcommands
//!
//! - `cryptohub algorithms`: List enabled algorithms.
//! - `cryptohub keygen`: Generate a key, optionally writing a key file.
//! - `cryptohub pubkey`: Derive the public half of a key file.
//! - `cryptohub hash`: SHA-256 of a string or file.
//! - `cryptohub sign` / `cryptohub verify`: Digest signatures.
//!
//! ## Exit Codes
//!
//! `0` on success or a valid signature, `1` when a signature does not
//! match, `2` on any error.
//!
//! ```bash
//! cryptohub keygen --algorithm Ed25519 --out signer.json
//! cryptohub sign --key signer.json --file release.tar.gz
//! ```

pub mod algorithms;
pub mod hash;
pub mod keyfile;
pub mod keygen;
pub mod signing;

use std::path::Path;

use anyhow::{Context, Result};
use cryptohub_core::Digest;

/// Exit code for a signature that did not verify.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit code for any error.
pub const EXIT_ERROR: u8 = 2;

/// SHA-256 digest of a file's contents.
pub fn digest_file(path: &Path) -> Result<Digest> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(Digest::sha256(&data))
}
