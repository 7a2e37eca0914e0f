use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flow_client::{CurveType, HashAlgorithm, KeyPair};
use serde::Serialize;

/// Generate or inspect a Flow account key
#[derive(Parser, Debug)]
#[command(name = "flow-keygen", version, about)]
struct Cli {
    /// Signature curve of the account key
    #[arg(long, value_enum, default_value_t = CurveArg::P256)]
    curve: CurveArg,

    /// Hash algorithm the account key is registered with
    #[arg(long, value_enum, default_value_t = HashArg::Sha3)]
    hash: HashArg,

    /// Derive from an existing private key instead of generating one
    #[arg(long, value_name = "HEX")]
    private_key: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CurveArg {
    #[value(name = "p256")]
    P256,
    #[value(name = "secp256k1")]
    Secp256k1,
}

impl From<CurveArg> for CurveType {
    fn from(arg: CurveArg) -> Self {
        match arg {
            CurveArg::P256 => CurveType::P256,
            CurveArg::Secp256k1 => CurveType::Secp256k1,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HashArg {
    #[value(name = "sha2")]
    Sha2,
    #[value(name = "sha3")]
    Sha3,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha2 => HashAlgorithm::Sha2_256,
            HashArg::Sha3 => HashAlgorithm::Sha3_256,
        }
    }
}

#[derive(Serialize)]
struct KeyOutput {
    sign_algo: CurveType,
    hash_algo: HashAlgorithm,
    private_key: String,
    public_key: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let curve = CurveType::from(cli.curve);

    let key = match cli.private_key.as_deref() {
        Some(hex) => KeyPair::from_hex(hex, None, curve).context("invalid private key")?,
        None => KeyPair::generate(curve).context("key generation failed")?,
    }
    .with_hash_algorithm(cli.hash.into());

    let output = KeyOutput {
        sign_algo: key.curve(),
        hash_algo: key.hash_algorithm(),
        private_key: key.private_key_hex().to_string(),
        public_key: key.public_key_hex(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Signature algorithm: {}", output.sign_algo.name());
        println!("Hash algorithm: {}", output.hash_algo.name());
        println!("Private key (hex): {}", output.private_key);
        println!("Public key (hex): {}", output.public_key);
    }

    Ok(())
}
