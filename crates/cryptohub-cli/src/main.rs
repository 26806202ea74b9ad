//! # cryptohub CLI entry point
//!
//! Parses command-line arguments, builds the software CSP from
//! `CRYPTOHUB_*` environment variables, and dispatches to subcommand
//! handlers.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cryptohub_cli::algorithms::{run_algorithms, AlgorithmsArgs};
use cryptohub_cli::hash::{run_hash, HashArgs};
use cryptohub_cli::keygen::{run_keygen, run_pubkey, KeygenArgs, PubkeyArgs};
use cryptohub_cli::signing::{run_sign, run_verify, SignArgs, VerifyArgs};
use cryptohub_cli::EXIT_ERROR;
use cryptohub_sw::create_csp_from_env;

/// cryptohub: software cryptographic service provider
///
/// Generates keys, derives public keys, and signs and verifies digests with
/// Ed25519, ECDSA P-256, and HMAC-SHA256. Enabled algorithms and the key
/// store are read from CRYPTOHUB_ALGORITHMS and CRYPTOHUB_KEYSTORE.
#[derive(Parser, Debug)]
#[command(name = "cryptohub", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List enabled algorithms.
    Algorithms(AlgorithmsArgs),

    /// Generate a key.
    Keygen(KeygenArgs),

    /// Derive the public key of a private key file.
    Pubkey(PubkeyArgs),

    /// Print the SHA-256 digest of a string or file.
    Hash(HashArgs),

    /// Sign a digest.
    Sign(SignArgs),

    /// Verify a signature over a digest.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cryptohub CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<u8> {
    let csp = || {
        let csp = create_csp_from_env().context("invalid CSP configuration")?;
        tracing::debug!(?csp, "CSP ready");
        anyhow::Ok(csp)
    };

    match command {
        Commands::Algorithms(args) => run_algorithms(&args, &csp()?),
        Commands::Keygen(args) => run_keygen(&args, &csp()?),
        Commands::Pubkey(args) => run_pubkey(&args, &csp()?),
        Commands::Hash(args) => run_hash(&args),
        Commands::Sign(args) => run_sign(&args, &csp()?),
        Commands::Verify(args) => run_verify(&args, &csp()?),
    }
}
