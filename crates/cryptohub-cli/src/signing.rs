//! # Signing Subcommands
//!
//! `sign` and `verify` over a 32-byte digest given as hex, or the SHA-256
//! of a file. HMAC-SHA256 key files both sign and verify; asymmetric
//! schemes verify with either half.
//!
//! ## Exit Codes
//!
//! `verify` returns `0` for a valid signature and `1` for a well-formed
//! signature that does not match. Malformed input is an error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};

use cryptohub_core::{Digest, Signature, Signer, Verifier};
use cryptohub_sw::SoftwareCsp;

use crate::keyfile::load_key;
use crate::EXIT_MISMATCH;

/// Arguments for `cryptohub sign`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("message").required(true).args(["digest", "file"])))]
pub struct SignArgs {
    /// Key file to sign with.
    #[arg(long, short)]
    pub key: PathBuf,

    /// Digest to sign, hex-encoded.
    #[arg(long)]
    pub digest: Option<String>,

    /// Sign the SHA-256 digest of this file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `cryptohub verify`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("message").required(true).args(["digest", "file"])))]
pub struct VerifyArgs {
    /// Key file to verify with.
    #[arg(long, short)]
    pub key: PathBuf,

    /// Digest that was signed, hex-encoded.
    #[arg(long)]
    pub digest: Option<String>,

    /// Verify against the SHA-256 digest of this file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Signature to check, hex-encoded.
    #[arg(long, short)]
    pub signature: String,
}

/// Execute `cryptohub sign`.
pub fn run_sign(args: &SignArgs, csp: &SoftwareCsp) -> Result<u8> {
    let signature = sign(args, csp)?;
    println!("{}", signature.to_hex());
    Ok(0)
}

/// Execute `cryptohub verify`.
pub fn run_verify(args: &VerifyArgs, csp: &SoftwareCsp) -> Result<u8> {
    if verify(args, csp)? {
        println!("valid");
        Ok(0)
    } else {
        println!("invalid");
        Ok(EXIT_MISMATCH)
    }
}

/// Sign the digest selected by `args`.
pub fn sign(args: &SignArgs, csp: &SoftwareCsp) -> Result<Signature> {
    let key = load_key(&args.key, csp)?;
    let digest = resolve_digest(args.digest.as_deref(), args.file.as_ref())?;
    csp.sign(&key, &digest)
        .with_context(|| format!("failed to sign with {}", args.key.display()))
}

/// Verify the signature in `args`.
pub fn verify(args: &VerifyArgs, csp: &SoftwareCsp) -> Result<bool> {
    let key = load_key(&args.key, csp)?;
    let digest = resolve_digest(args.digest.as_deref(), args.file.as_ref())?;
    let signature = Signature::from_hex(&args.signature).context("invalid signature hex")?;
    csp.verify(&key, &digest, &signature)
        .with_context(|| format!("failed to verify with {}", args.key.display()))
}

fn resolve_digest(hex: Option<&str>, file: Option<&PathBuf>) -> Result<Digest> {
    match (hex, file) {
        (Some(hex), _) => Digest::from_hex(hex).context("invalid digest hex"),
        (None, Some(path)) => crate::digest_file(path),
        (None, None) => anyhow::bail!("one of --digest or --file is required"),
    }
}
