//! # Hash Subcommand
//!
//! Prints the SHA-256 digest of a string or file as hex, in the form
//! `sign --digest` and `verify --digest` accept.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args};

use cryptohub_core::Digest;

/// Arguments for `cryptohub hash`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "file"])))]
pub struct HashArgs {
    /// Hash this string (UTF-8 bytes, no trailing newline).
    #[arg(long)]
    pub input: Option<String>,

    /// Hash the contents of this file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Execute `cryptohub hash`.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    println!("{}", hash_source(args)?);
    Ok(0)
}

fn hash_source(args: &HashArgs) -> Result<Digest> {
    match (&args.input, &args.file) {
        (Some(input), _) => Ok(Digest::sha256(input.as_bytes())),
        (None, Some(path)) => crate::digest_file(path),
        (None, None) => anyhow::bail!("one of --input or --file is required"),
    }
}
