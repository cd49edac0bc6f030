use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURES: &str = r#"
customers:
  cus_1:
    email: one@example.com
plans:
  gold:
    amount: 2000
sources:
  cus_1:
    card_1:
      object: card
"#;

fn fixture_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stripe_mock() -> Command {
    let mut cmd = Command::cargo_bin("stripe-mock").unwrap();
    cmd.env_remove("STRIPE_MOCK_FIXTURES").arg("--quiet");
    cmd
}

#[test]
fn test_check_reports_counts() {
    let file = fixture_file(FIXTURES);

    stripe_mock()
        .arg("check")
        .arg("--fixtures")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("customers:     1"))
        .stdout(predicate::str::contains("sources:       1"));
}

#[test]
fn test_check_json() {
    let file = fixture_file(FIXTURES);

    let output = stripe_mock()
        .args(["check", "--format", "json", "--fixtures"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], true);
    assert_eq!(report["counts"]["plans"], 1);
}

#[test]
fn test_check_missing_file_is_config_error() {
    stripe_mock()
        .args(["check", "--fixtures", "does/not/exist.yaml"])
        .assert()
        .code(2);
}

#[test]
fn test_check_rejects_unknown_fields() {
    let file = fixture_file("plans:\n  gold:\n    colour: gold\n");

    stripe_mock()
        .arg("check")
        .arg("--fixtures")
        .arg(file.path())
        .assert()
        .code(2);
}

#[test]
fn test_check_strict_orphans_is_validation_error() {
    let file = fixture_file("sources:\n  cus_9:\n    card_1:\n      object: card\n");

    stripe_mock()
        .args(["check", "--strict", "--fixtures"])
        .arg(file.path())
        .assert()
        .code(5);
}

#[test]
fn test_routes_hide_cards_from_global_sources() {
    let file = fixture_file(FIXTURES);

    stripe_mock()
        .args(["routes", "--exact-only", "--fixtures"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("/v1/customers/cus_1/sources/card_1"))
        .stdout(predicate::str::contains("/v1/sources/card_1").not())
        .stdout(predicate::str::contains("/v1/plans/gold"));
}

#[test]
fn test_routes_json() {
    let output = stripe_mock()
        .args(["routes", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let routes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(routes
        .iter()
        .any(|r| r["matcher"] == "/v1/customers" && r["responder"] == "200"));
    assert!(routes.iter().any(|r| r["responder"] == "callback"));
}
