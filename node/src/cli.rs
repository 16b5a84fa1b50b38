//! # CLI Interface
//!
//! Defines the command-line argument structure for `passvault-node`
//! using `clap` derive. Supports three subcommands: `keygen`, `demo`,
//! and `version`.

use clap::{Parser, Subcommand};

/// Passvault protocol operator tool.
///
/// Generates passkey material, produces signed test fixtures, and runs
/// a scripted end-to-end demonstration of the vault protocol with real
/// P-256 signatures.
#[derive(Parser, Debug)]
#[command(
    name = "passvault-node",
    about = "Passvault protocol operator tool",
    version,
    propagate_version = true
)]
pub struct PassvaultCli {
    /// Log output format: pretty or json.
    #[arg(long, env = "PASSVAULT_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the passvault-node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh P-256 passkey and print signed test fixtures.
    Keygen(KeygenArgs),
    /// Run a scripted vault lifecycle against an in-memory registry.
    Demo(DemoArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `keygen` subcommand.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Vault id to bake into the signed fixtures.
    #[arg(long, default_value_t = 1)]
    pub vault_id: u64,

    /// Withdrawal amount in µSTX for the fixture signature.
    #[arg(long, default_value_t = 100_000_000)]
    pub amount: u128,

    /// Nonce to sign the fixtures at.
    #[arg(long, default_value_t = 0)]
    pub nonce: u64,

    /// Also print the private key. Off by default so a casual terminal
    /// session doesn't leak it into scrollback.
    #[arg(long)]
    pub reveal_secret: bool,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Initial deposit in µSTX.
    #[arg(long, default_value_t = 500_000_000)]
    pub deposit: u128,

    /// Daily withdrawal limit in µSTX.
    #[arg(long, default_value_t = 1_000_000_000)]
    pub daily_limit: u128,

    /// Amount withdrawn during the demo, in µSTX.
    #[arg(long, default_value_t = 100_000_000)]
    pub withdraw: u128,
}
