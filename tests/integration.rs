// Smoke tests for the deckopt binary: argument parsing and the built-in catalog.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Builds a Command with HOME pointed at an empty dir so no global config leaks in.
fn deckopt(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("deckopt").expect("binary should exist");
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deckopt"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exhaustive deck optimizer"));
}

#[test]
fn score_requires_cards() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn narrow_requires_first_card() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("narrow")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--first"));
}

#[test]
fn verbose_and_quiet_conflict() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .args(["-v", "-q", "catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_config_falls_back_to_builtin_catalog() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("--dir")
        .arg(home.path())
        .arg("catalog")
        .assert()
        .success()
        .stderr(predicate::str::contains("using built-in catalog"))
        .stdout(predicate::str::contains("Catalog (20 cards"))
        .stdout(predicate::str::contains("- trio [==3 -> 3]"))
        .stdout(predicate::str::contains("Modes: default, lenient"));
}

#[test]
fn builtin_catalog_lenient_mode_uses_at_least_trios() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("--dir")
        .arg(home.path())
        .args(["catalog", "--mode", "lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- trio [>=3 -> 3]"));
}

#[test]
fn builtin_catalog_scores_a_thrower_trio() {
    let home = TempDir::new().expect("temp dir should be created");
    deckopt(&home)
        .arg("--dir")
        .arg(home.path())
        .args(["score", "Spear Goblin", "Bomber", "Executioner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 3"))
        .stdout(predicate::str::contains("Thrower: +3"));
}
