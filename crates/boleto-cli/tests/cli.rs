use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn boleto(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("boleto").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();

    boleto(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 5000"))
        .stdout(predicate::str::contains("sqlite://boleto.db"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    boleto(&home)
        .args(["config", "set", "server.port", "8080"])
        .assert()
        .success();

    boleto(&home)
        .args(["config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8080"));
}

#[test]
fn config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();

    boleto(&home)
        .args(["config", "get", "server.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn process_without_matches_fails() {
    let home = TempDir::new().unwrap();
    let pattern = home.path().join("*.pdf");

    boleto(&home)
        .args(["process", "--dry-run"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn process_rejects_non_pdf_and_empty_files() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("nota.txt"), "texto qualquer").unwrap();
    fs::write(home.path().join("vazio.pdf"), "").unwrap();
    let pattern = home.path().join("*.*");

    boleto(&home)
        .args(["process", "--dry-run"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Arquivo não é um PDF."))
        .stdout(predicate::str::contains("O arquivo está vazio"));
}

#[test]
fn process_csv_output_to_file_with_summary() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("nota.txt"), "texto qualquer").unwrap();
    let out_dir = home.path().join("saida");
    fs::create_dir_all(&out_dir).unwrap();
    let output = out_dir.join("resultado.csv");

    boleto(&home)
        .args(["process", "--dry-run", "--format", "csv", "--summary", "--output"])
        .arg(&output)
        .arg(home.path().join("*.txt").to_str().unwrap())
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("arquivo,status,id,detalhes"));
    assert!(csv.contains("nota.txt,400"));
    assert!(out_dir.join("summary.csv").exists());
}

#[test]
fn process_creates_database_when_storing() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("nota.txt"), "texto qualquer").unwrap();
    let db = home.path().join("boletos.db");

    boleto(&home)
        .args(["process", "--database-url"])
        .arg(format!("sqlite://{}", db.display()))
        .arg(home.path().join("*.txt").to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": 400"));

    assert!(db.exists());
}

#[test]
fn process_reads_user_config_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("nota.txt"), "texto qualquer").unwrap();
    let db = home.path().join("configurado.db");

    boleto(&home)
        .args(["config", "set", "database.url"])
        .arg(format!("sqlite://{}", db.display()))
        .assert()
        .success();

    boleto(&home)
        .current_dir(home.path())
        .arg("process")
        .arg(home.path().join("*.txt").to_str().unwrap())
        .assert()
        .success();

    assert!(db.exists());
}
