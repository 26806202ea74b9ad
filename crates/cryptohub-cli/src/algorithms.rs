//! # Algorithms Subcommand
//!
//! Lists the algorithms the configured CSP enables.

use anyhow::Result;
use clap::Args;

use cryptohub_sw::{Algorithm, SoftwareCsp};

/// Arguments for `cryptohub algorithms`.
#[derive(Args, Debug)]
pub struct AlgorithmsArgs {
    /// Emit a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute `cryptohub algorithms`.
pub fn run_algorithms(args: &AlgorithmsArgs, csp: &SoftwareCsp) -> Result<u8> {
    let algorithms = csp.algorithms();
    if args.json {
        println!("{}", serde_json::to_string(&algorithms)?);
    } else {
        for algorithm in &algorithms {
            println!("{}", describe(*algorithm));
        }
    }
    Ok(0)
}

fn describe(algorithm: Algorithm) -> String {
    let class = if algorithm.is_symmetric() {
        "symmetric"
    } else {
        "asymmetric"
    };
    let digest = match algorithm.digest_len() {
        Some(len) => format!("digest {len} bytes"),
        None => "no signing".to_string(),
    };
    format!("{:<12} {:<10} {digest}", algorithm.as_str(), class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_signing_scheme() {
        assert_eq!(
            describe(Algorithm::Ed25519),
            "Ed25519      asymmetric digest 32 bytes"
        );
    }

    #[test]
    fn describe_non_signing_scheme() {
        assert_eq!(
            describe(Algorithm::Aes256),
            "AES-256      symmetric  no signing"
        );
    }

    #[test]
    fn runs_against_default_csp() {
        let args = AlgorithmsArgs { json: true };
        assert_eq!(run_algorithms(&args, &SoftwareCsp::new()).unwrap(), 0);
    }
}
