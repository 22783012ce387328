//! Smoke tests for the packcalc binary
//!
//! These tests execute the compiled `packcalc` binary in an isolated working
//! directory with the packcalc environment variables cleared, so neither the
//! developer's shell nor a stray `.packcalc/config.toml` can leak in.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const PACKCALC_ENV: [&str; 5] = [
    "PACK_SIZES",
    "PACKCALC_BIND",
    "PACKCALC_MAX_QUANTITY",
    "PACKCALC_ALLOWED_ORIGIN",
    "RUST_LOG",
];

/// Temp directory that discovery will not climb out of.
fn isolated_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

fn packcalc_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("packcalc"));
    cmd.current_dir(cwd);
    for var in PACKCALC_ENV {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn calc_with_default_catalog() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .args(["calc", "12001"])
        .assert()
        .success()
        .stdout("Order quantity: 12001\nPack distribution:\n  5000 × 2\n  2000 × 1\n  250 × 1\n");
}

#[test]
fn calc_rounds_small_orders_up() {
    let dir = isolated_dir();
    for (quantity, line) in [("1", "  250 × 1\n"), ("251", "  500 × 1\n")] {
        packcalc_cmd(dir.path())
            .args(["calc", quantity])
            .assert()
            .success()
            .stdout(predicate::str::ends_with(format!("Pack distribution:\n{line}")));
    }
}

#[test]
fn calc_json_output() {
    let dir = isolated_dir();
    let output = packcalc_cmd(dir.path())
        .args(["--pack-sizes", "23,31,53", "calc", "263", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["quantity"], 263);
    assert_eq!(json["total_items"], 263);
    assert_eq!(json["total_packs"], 9);
    assert_eq!(json["packs"], serde_json::json!({"23": 2, "31": 7}));
}

#[test]
fn catalog_from_environment() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .env("PACK_SIZES", "3,5")
        .args(["calc", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  3 × 2\n"));
}

#[test]
fn catalog_from_discovered_config_file() {
    let dir = isolated_dir();
    fs::create_dir(dir.path().join(".packcalc")).unwrap();
    fs::write(
        dir.path().join(".packcalc/config.toml"),
        "[catalog]\npack_sizes = [3, 7]\n",
    )
    .unwrap();

    packcalc_cmd(dir.path())
        .args(["calc", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  7 × 1\n  3 × 1\n"));
}

#[test]
fn invalid_quantity_exits_with_cli_args_code() {
    let dir = isolated_dir();
    for quantity in ["0", "-5", "abc"] {
        packcalc_cmd(dir.path())
            .args(["calc", quantity])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Quantity must be a positive integer"));
    }
}

#[test]
fn untabulable_quantity_exits_with_cli_args_code() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .args(["--pack-sizes", "250,500", "calc", "9223372036854775807"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("too large to allocate"));
}

#[test]
fn invalid_pack_sizes_env_exits_with_cli_args_code() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .env("PACK_SIZES", "250,zero")
        .args(["calc", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid pack size 'zero' in PACK_SIZES"));
}

#[test]
fn blank_pack_sizes_env_exits_with_cli_args_code() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .env("PACK_SIZES", "  ")
        .args(["calc", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("PACK_SIZES must be set and not empty"));
}

#[test]
fn missing_explicit_config_file_is_rejected() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .args(["--config", "nope.toml", "config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn config_reports_sources() {
    let dir = isolated_dir();
    packcalc_cmd(dir.path())
        .env("PACK_SIZES", "10,20")
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pack_sizes     = 10,20 (env)"))
        .stdout(predicate::str::contains("max_quantity   = 10000000 (default)"));
}
