#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;

/// The CLI bound to a store file, so runs share session and history.
pub fn cli_with_store(store: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("payout-calc"));
    cmd.env_remove("PAYOUT_STORE")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(store);
    cmd
}

/// The CLI with in-memory storage: nothing is read or written.
pub fn ephemeral_cli() -> Command {
    let mut cmd = Command::new(cargo_bin!("payout-calc"));
    cmd.env_remove("PAYOUT_STORE")
        .env_remove("RUST_LOG")
        .arg("--ephemeral");
    cmd
}

/// Reads the saved history ids straight from the store file.
pub fn stored_ids(store: &Path) -> Vec<String> {
    let raw = std::fs::read_to_string(store).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    doc["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap().to_string())
        .collect()
}
