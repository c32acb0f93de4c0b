// ABOUTME: Integration tests for the vitrin CLI commands.
// ABOUTME: Validates --help, init, offline price preview, and manifest-updating deletes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn vitrin_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vitrin"))
}

/// Config pointing at a closed local port; only commands that never touch
/// the network succeed against it.
fn write_offline_config(dir: &Path) {
    fs::write(
        dir.join("vitrin.yml"),
        "api:\n  host: 127.0.0.1\n  port: 1\nrequest_timeout: 2s\n",
    )
    .unwrap();
}

#[test]
fn help_shows_commands() {
    vitrin_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("sign"))
        .stdout(predicate::str::contains("price"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("vitrin.yml");

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "vitrin.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("api:"), "Config should have api section");
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("vitrin.yml");

    fs::write(&config_path, "existing: config").unwrap();

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("vitrin.yml"), "existing: config").unwrap();

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("vitrin.yml")).unwrap();
    assert!(content.contains("api:"));
}

#[test]
fn price_previews_a_range() {
    let temp_dir = tempfile::tempdir().unwrap();
    let variants = temp_dir.path().join("variants.json");
    fs::write(
        &variants,
        r#"[
            {"id":"v0","unit":"kg","amount":1,"price":300,"stock":5},
            {"id":"v1","unit":"kg","amount":5,"price":700,"stock":2}
        ]"#,
    )
    .unwrap();

    vitrin_cmd()
        .args(["price", "--file"])
        .arg(&variants)
        .assert()
        .success()
        .stdout(predicate::str::contains("3.00\u{2013}7.00"));
}

#[test]
fn price_with_selection_is_exact() {
    let temp_dir = tempfile::tempdir().unwrap();
    let variants = temp_dir.path().join("variants.json");
    fs::write(
        &variants,
        r#"[
            {"id":"v0","unit":"kg","amount":1,"price":300,"stock":5},
            {"id":"v1","unit":"kg","amount":2,"price":450,"stock":1}
        ]"#,
    )
    .unwrap();

    vitrin_cmd()
        .args(["price", "--selected", "v1", "--file"])
        .arg(&variants)
        .assert()
        .success()
        .stdout(predicate::str::contains("4.50"))
        .stdout(predicate::str::contains("selected: v1"));
}

#[test]
fn price_without_variants_is_not_available() {
    let temp_dir = tempfile::tempdir().unwrap();
    let variants = temp_dir.path().join("variants.json");
    fs::write(&variants, "[]").unwrap();

    vitrin_cmd()
        .args(["price", "--file"])
        .arg(&variants)
        .assert()
        .success()
        .stdout(predicate::str::contains("not available"));
}

#[test]
fn price_flags_an_out_of_stock_selection() {
    let temp_dir = tempfile::tempdir().unwrap();
    let variants = temp_dir.path().join("variants.json");
    fs::write(
        &variants,
        r#"[{"id":"v0","unit":"kg","amount":1,"price":300,"stock":0}]"#,
    )
    .unwrap();

    vitrin_cmd()
        .args(["price", "--file"])
        .arg(&variants)
        .assert()
        .success()
        .stdout(predicate::str::contains("[out of stock]"));
}

#[test]
fn upload_transport_failure_exits_with_the_retryable_code() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_offline_config(temp_dir.path());
    fs::write(temp_dir.path().join("a.jpg"), b"jpeg bytes").unwrap();

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .args(["upload", "a.jpg"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn sign_returns_local_references_unchanged() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_offline_config(temp_dir.path());

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .args(["sign", "/uploads/a.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/uploads/a.jpg"));
}

#[test]
fn delete_external_reference_updates_manifest_without_network() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_offline_config(temp_dir.path());

    let manifest = temp_dir.path().join("images.json");
    fs::write(
        &manifest,
        r#"["https://cdn.example.com/x.jpg", "/uploads/keep.jpg"]"#,
    )
    .unwrap();

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .args(["delete", "https://cdn.example.com/x.jpg", "--manifest"])
        .arg(&manifest)
        .assert()
        .success();

    let updated: Vec<String> = serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(updated, vec!["/uploads/keep.jpg".to_string()]);
}

#[test]
fn delete_managed_reference_fails_and_keeps_manifest_when_api_is_down() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_offline_config(temp_dir.path());

    let manifest = temp_dir.path().join("images.json");
    let original = r#"["/uploads/a.jpg", "/uploads/b.jpg"]"#;
    fs::write(&manifest, original).unwrap();

    vitrin_cmd()
        .current_dir(temp_dir.path())
        .args(["delete", "/uploads/a.jpg", "--manifest"])
        .arg(&manifest)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Error"));

    assert_eq!(fs::read_to_string(&manifest).unwrap(), original);
}
