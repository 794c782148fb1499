//! End-to-end checks of the `hechainc` command line.
//!
//! Run with:
//!   cargo test -p hechain-client --test cli

use std::path::Path;
use std::process::{Command, Output};

use hechain_core::constants::{EXIT_CODE_GENERAL, EXIT_CODE_USAGE};

fn command(args: &[&str], root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hechainc"));
    cmd.args(args).arg("--root-dir").arg(root);
    cmd
}

fn hechainc(args: &[&str], root: &Path) -> Output {
    command(args, root)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run hechainc")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn config_defaults_to_testnet() {
    let tmp = tempfile::tempdir().unwrap();
    let out = hechainc(&["config"], tmp.path());
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("testnet"), "{text}");
    assert!(text.contains("localhost:23110"), "{text}");
    assert!(text.contains("Client for chain:            hechain"), "{text}");
    // nothing is persisted without init
    assert!(!tmp.path().join("client.json").exists());
}

#[test]
fn init_then_constants_follow_devnet() {
    let tmp = tempfile::tempdir().unwrap();
    let out = hechainc(&["init", "--network", "devnet"], tmp.path());
    assert!(out.status.success());
    assert!(tmp.path().join("client.json").is_file());

    let out = hechainc(&["constants"], tmp.path());
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["chain_info"]["network_name"], "devnet");
    assert_eq!(json["block_frequency"], 12);
    assert_eq!(json["target_window"], 20);

    let out = hechainc(&["version"], tmp.path());
    assert!(stdout(&out).starts_with("Hechain Client v0.1.0-dev"));
}

#[test]
fn init_does_not_overwrite_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(hechainc(&["init"], tmp.path()).status.success());

    let out = hechainc(&["init", "--network", "devnet"], tmp.path());
    assert_eq!(out.status.code(), Some(EXIT_CODE_GENERAL));

    let out = hechainc(&["init", "--network", "devnet", "--force"], tmp.path());
    assert!(out.status.success());
}

#[test]
fn unknown_network_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let out = hechainc(&["init", "--network", "mainnet"], tmp.path());
    assert_eq!(out.status.code(), Some(EXIT_CODE_GENERAL));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not recognized"));
    assert!(!tmp.path().join("client.json").exists());
}

#[test]
fn usage_errors_exit_64() {
    let tmp = tempfile::tempdir().unwrap();
    assert_eq!(
        hechainc(&["frobnicate"], tmp.path()).status.code(),
        Some(EXIT_CODE_USAGE)
    );
    assert_eq!(
        hechainc(&["config", "--bogus"], tmp.path()).status.code(),
        Some(EXIT_CODE_USAGE)
    );
}

#[test]
fn default_log_filter_reports_init() {
    let tmp = tempfile::tempdir().unwrap();
    let out = command(&["init"], tmp.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("run hechainc");
    assert!(out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("client config initialised"), "stderr: {err}");
}

#[test]
fn each_command_reads_the_persisted_network() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(hechainc(&["init", "--network", "devnet"], tmp.path()).status.success());

    let out = hechainc(&["config"], tmp.path());
    assert!(stdout(&out).contains("devnet"));
    let out = hechainc(&["version"], tmp.path());
    assert_eq!(stdout(&out).lines().next(), Some("Hechain Client v0.1.0-dev"));
}
