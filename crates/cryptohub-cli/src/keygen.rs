//! # Key Subcommands
//!
//! `keygen` generates a key through the CSP. Without `--out` the key is
//! ephemeral and non-exportable: only its SKI (and public key, for
//! asymmetric schemes) is printed. With `--out` the key is generated
//! exportable and written as a key file.
//!
//! `pubkey` derives the public half of a private key file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cryptohub_core::{Key, KeyGenOptions, KeyGenerator};
use cryptohub_sw::{SoftwareCsp, SoftwareKey};

use crate::keyfile::{load_key, KeyFile};

/// Arguments for `cryptohub keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Algorithm identifier (case-insensitive), e.g. Ed25519 or ECDSA-P256.
    #[arg(long, short)]
    pub algorithm: String,

    /// Write the key to this file. The key is generated exportable.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Arguments for `cryptohub pubkey`.
#[derive(Args, Debug)]
pub struct PubkeyArgs {
    /// Private key file.
    #[arg(long, short)]
    pub key: PathBuf,

    /// Write the public key to this file.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Execute `cryptohub keygen`.
pub fn run_keygen(args: &KeygenArgs, csp: &SoftwareCsp) -> Result<u8> {
    let opts = KeyGenOptions::new(args.algorithm.as_str()).with_exportable(args.out.is_some());
    let key = csp
        .key_gen(&opts)
        .with_context(|| format!("failed to generate {} key", args.algorithm))?;

    if let Some(out) = &args.out {
        KeyFile::from_key(&key)?.save(out)?;
        println!("OK: wrote {} key to {}", key.algorithm(), out.display());
    } else {
        println!("OK: generated {} key", key.algorithm());
    }
    print_identity(&key)?;
    Ok(0)
}

/// Execute `cryptohub pubkey`.
pub fn run_pubkey(args: &PubkeyArgs, csp: &SoftwareCsp) -> Result<u8> {
    let key = load_key(&args.key, csp)?;
    let public = key
        .public_key()
        .with_context(|| format!("{} has no public key", args.key.display()))?;

    if let Some(out) = &args.out {
        KeyFile::from_key(&public)?.save(out)?;
        println!("OK: wrote public key to {}", out.display());
    }
    print_identity(&public)?;
    Ok(0)
}

fn print_identity(key: &SoftwareKey) -> Result<()> {
    println!("  SKI:        {}", key.ski());
    if !key.is_symmetric() {
        let public = key.public_key()?.to_bytes()?;
        println!("  Public key: {}", public.to_hex());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptohub_sw::KeyClass;

    #[test]
    fn keygen_without_out_is_ephemeral() {
        let csp = SoftwareCsp::new();
        let args = KeygenArgs {
            algorithm: "ed25519".to_string(),
            out: None,
        };
        assert_eq!(run_keygen(&args, &csp).unwrap(), 0);
        assert!(csp.list_keys().is_empty());
    }

    #[test]
    fn keygen_with_out_writes_exportable_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.json");
        let csp = SoftwareCsp::new();
        let args = KeygenArgs {
            algorithm: "ECDSA-P256".to_string(),
            out: Some(path.clone()),
        };
        assert_eq!(run_keygen(&args, &csp).unwrap(), 0);

        let key = load_key(&path, &csp).unwrap();
        assert_eq!(key.class(), KeyClass::Private);
        assert_eq!(key.to_bytes().unwrap().len(), 32);
    }

    #[test]
    fn keygen_unknown_algorithm_fails() {
        let csp = SoftwareCsp::new();
        let args = KeygenArgs {
            algorithm: "RSA-2048".to_string(),
            out: None,
        };
        let err = run_keygen(&args, &csp).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported algorithm"));
    }

    #[test]
    fn pubkey_writes_public_half() {
        let dir = tempfile::tempdir().unwrap();
        let private_path = dir.path().join("private.json");
        let public_path = dir.path().join("public.json");
        let csp = SoftwareCsp::new();

        run_keygen(
            &KeygenArgs {
                algorithm: "Ed25519".to_string(),
                out: Some(private_path.clone()),
            },
            &csp,
        )
        .unwrap();
        let args = PubkeyArgs {
            key: private_path.clone(),
            out: Some(public_path.clone()),
        };
        assert_eq!(run_pubkey(&args, &csp).unwrap(), 0);

        let private = load_key(&private_path, &csp).unwrap();
        let public = load_key(&public_path, &csp).unwrap();
        assert_eq!(public.class(), KeyClass::Public);
        assert_eq!(public.ski(), private.ski());
    }

    #[test]
    fn pubkey_of_symmetric_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mac.json");
        let csp = SoftwareCsp::new();
        run_keygen(
            &KeygenArgs {
                algorithm: "HMAC-SHA256".to_string(),
                out: Some(path.clone()),
            },
            &csp,
        )
        .unwrap();
        let args = PubkeyArgs {
            key: path,
            out: None,
        };
        assert!(run_pubkey(&args, &csp).is_err());
    }
}
