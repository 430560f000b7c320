//! Configuration error handling for the vaultfind binary

use assert_cmd::Command;
use predicates::prelude::*;
use vaultfind::test_utils::TestHome;

fn vaultfind(home: &TestHome) -> Command {
    let mut cmd = Command::cargo_bin("vaultfind").expect("binary should build");
    cmd.env_clear().env("HOME", home.path());
    cmd
}

#[test]
fn test_missing_address_exits_1() {
    let home = TestHome::with_token("hvs.token");
    vaultfind(&home)
        .env("VAULT_TOKEN", "hvs.token")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("VAULT_ADDR"))
        .stderr(predicate::str::contains("error listing secrets").not());
}

#[test]
fn test_missing_token_exits_1() {
    let home = TestHome::new();
    vaultfind(&home)
        .env("VAULT_ADDR", "http://127.0.0.1:8200")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".vault-token"));
}

#[test]
fn test_invalid_address_exits_1() {
    let home = TestHome::new();
    vaultfind(&home)
        .env("VAULT_ADDR", "not a url")
        .env("VAULT_TOKEN", "hvs.token")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid Vault address"));
}

#[test]
fn test_empty_mount_exits_1() {
    let home = TestHome::new();
    vaultfind(&home)
        .env("VAULT_ADDR", "http://127.0.0.1:8200")
        .env("VAULT_TOKEN", "hvs.token")
        .args(["-m", "/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid mount point"))
        .stderr(predicate::str::contains("error listing secrets").not());
}

#[test]
fn test_unreachable_server_exits_1() {
    let home = TestHome::new();
    // Port 9 (discard) is not expected to run an HTTP server
    vaultfind(&home)
        .env("VAULT_ADDR", "http://127.0.0.1:9")
        .env("VAULT_TOKEN", "hvs.token")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error listing secrets"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let home = TestHome::new();
    vaultfind(&home).arg("--no-such-flag").assert().code(2);
}

#[test]
fn test_help_mentions_mount() {
    let home = TestHome::new();
    vaultfind(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--mount"));
}
