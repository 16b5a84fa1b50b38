// Copyright (c) 2026 Passvault Contributors. MIT License.
// See LICENSE for details.

//! # Passvault Operator Tool
//!
//! Entry point for the `passvault-node` binary. Parses CLI arguments,
//! initializes logging, and dispatches to the requested subcommand.
//!
//! The binary supports three subcommands:
//!
//! - `keygen`  — generate a P-256 passkey and signed test fixtures
//! - `demo`    — run a scripted vault lifecycle end to end
//! - `version` — print build version information

mod cli;
mod logging;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use passvault_protocol::clock::{Clock, SystemClock};
use passvault_protocol::crypto::{
    rotation_message_hash, verify, withdrawal_message_hash, Passkey,
};
use passvault_protocol::events::{EventSink, LogSink};
use passvault_protocol::{Principal, VaultRegistry};

use cli::{Commands, DemoArgs, KeygenArgs, PassvaultCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = PassvaultCli::parse();
    let format = LogFormat::from_str_lossy(&cli.log_format);

    match cli.command {
        Commands::Keygen(args) => {
            logging::init_logging("passvault_node=warn", format);
            keygen(args)
        }
        Commands::Demo(args) => {
            logging::init_logging("passvault_node=info,passvault_protocol=info", format);
            demo(args)
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Generates a fresh passkey and prints it to stdout as JSON, together
/// with signed withdrawal and rotation fixtures at the requested nonce.
/// The fixtures are exactly what `withdraw_with_passkey` and
/// `update_passkey` expect, so they paste straight into test harnesses.
fn keygen(args: KeygenArgs) -> Result<()> {
    let passkey = Passkey::generate();
    let public_key = passkey.public_key();

    let withdrawal_hash = withdrawal_message_hash(args.vault_id, args.amount, args.nonce);
    let withdrawal_sig = passkey
        .sign_hash(&withdrawal_hash)
        .context("signing withdrawal fixture")?;

    // Rotation fixture: the generated key approving itself as its own
    // successor. Structurally valid, and enough to exercise the path.
    let rotation_hash = rotation_message_hash(args.vault_id, &public_key, args.nonce);
    let rotation_sig = passkey
        .sign_hash(&rotation_hash)
        .context("signing rotation fixture")?;

    // Sanity: everything printed must verify against itself.
    if !verify(&public_key, &withdrawal_hash, &withdrawal_sig)
        || !verify(&public_key, &rotation_hash, &rotation_sig)
    {
        bail!("generated fixture failed self-verification");
    }

    let mut output = serde_json::json!({
        "public-key": public_key.to_hex(),
        "vault-id": args.vault_id,
        "nonce": args.nonce,
        "withdrawal": {
            "amount": args.amount,
            "message-hash": hex::encode(withdrawal_hash),
            "signature": hex::encode(withdrawal_sig),
        },
        "rotation": {
            "new-public-key": public_key.to_hex(),
            "message-hash": hex::encode(rotation_hash),
            "signature": hex::encode(rotation_sig),
        },
    });
    if args.reveal_secret {
        output["secret-key"] = serde_json::json!(hex::encode(passkey.secret_bytes()));
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Runs a complete vault lifecycle against an in-memory registry with
/// real signatures: create, deposit, signed withdrawal, replay attempt,
/// passkey rotation. Events stream to the log as they would in
/// production.
fn demo(args: DemoArgs) -> Result<()> {
    let clock = Arc::new(SystemClock);
    let sink = Arc::new(LogSink);
    let mut registry = VaultRegistry::new(
        Principal::from("deployer"),
        clock as Arc<dyn Clock>,
        sink as Arc<dyn EventSink>,
    );

    let owner = Principal::from("demo_owner");
    let passkey = Passkey::generate();

    let vault_id = registry
        .create_vault(&owner, passkey.public_key().as_bytes(), 0, args.daily_limit)
        .context("creating demo vault")?;

    let balance = registry
        .deposit_stx(&owner, vault_id, args.deposit)
        .context("funding demo vault")?;
    tracing::info!(vault_id, balance, "vault funded");

    let nonce = registry.get_nonce(vault_id).context("reading nonce")?;
    let hash = withdrawal_message_hash(vault_id, args.withdraw, nonce);
    let signature = passkey.sign_hash(&hash).context("signing withdrawal")?;

    let remaining = registry
        .withdraw_with_passkey(vault_id, args.withdraw, &signature)
        .context("signed withdrawal")?;
    tracing::info!(vault_id, remaining, "withdrawal accepted");

    // Replaying the same signature must fail now that the nonce moved.
    match registry.withdraw_with_passkey(vault_id, args.withdraw, &signature) {
        Err(err) => tracing::info!(code = err.code(), %err, "replay refused, as it should be"),
        Ok(_) => bail!("replayed signature was accepted; this is a bug"),
    }

    // Rotate to a fresh passkey, approved by the outgoing one.
    let next_key = Passkey::generate();
    let nonce = registry.get_nonce(vault_id).context("reading nonce")?;
    let rotation_hash = rotation_message_hash(vault_id, &next_key.public_key(), nonce);
    let rotation_sig = passkey.sign_hash(&rotation_hash).context("signing rotation")?;
    registry
        .update_passkey(vault_id, next_key.public_key().as_bytes(), &rotation_sig)
        .context("rotating passkey")?;
    tracing::info!(vault_id, "passkey rotated");

    let stats = registry.get_protocol_stats();
    tracing::info!(
        total_vaults = stats.total_vaults,
        total_deposits = stats.total_deposits,
        "demo complete"
    );
    Ok(())
}

/// Prints version and build information.
fn print_version() {
    println!("passvault-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol: {}", passvault_protocol::config::PROTOCOL_VERSION);
    println!("curve:    {}", passvault_protocol::config::SIGNING_CURVE);
}
