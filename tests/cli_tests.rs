mod common;

use assert_cmd::Command;
use common::{DictFile, WORDS};
use regex::Regex;
use serde_json::Value;

fn colcrack(dict: &DictFile) -> Command {
    let mut cmd = Command::cargo_bin("colcrack").unwrap();
    cmd.arg("--dictionary").arg(&dict.path);
    cmd
}

#[test]
fn test_encrypt_with_key() {
    let dict = DictFile::new(WORDS);
    let output = colcrack(&dict)
        .args(["encrypt", "--plaintext", "WHLLOOLELTD", "--key", "21"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Key:        [2, 1]"));
    assert!(stdout.contains("Ciphertext: HLOETWLOLLD"));
}

#[test]
fn test_encrypt_seed_is_reproducible() {
    let dict = DictFile::new(WORDS);
    let run = || {
        colcrack(&dict)
            .args(["encrypt", "-p", "attack at dawn", "--key-size", "4", "--seed", "7"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_crack_json_report() {
    let dict = DictFile::new(WORDS);
    let output = colcrack(&dict)
        .args([
            "crack",
            "--plaintext",
            "attackatdawn",
            "--key",
            "312",
            "--max-key-size",
            "3",
            "--no-oracle",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["candidateCount"], 8);
    assert_eq!(report["best"]["plaintext"], "attackatdawn");
    assert_eq!(report["best"]["key"], serde_json::json!([3, 1, 2]));
    assert_eq!(report["oracle"]["status"], "skipped");
}

#[test]
fn test_crack_tables() {
    let dict = DictFile::new(WORDS);
    let output = colcrack(&dict)
        .args([
            "crack",
            "--ciphertext",
            "HLOETWLOLLD",
            "--max-key-size",
            "2",
            "--no-oracle",
            "--show-grids",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Key: [2, 1]"));
    assert!(stdout.contains("WHLLOOLELTD"));
}

#[test]
fn test_missing_dictionary_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("colcrack")
        .unwrap()
        .arg("--dictionary")
        .arg(dir.path().join("missing.txt"))
        .args(["crack", "--ciphertext", "ABC", "--no-oracle"])
        .assert()
        .failure();
}

#[test]
fn test_bad_key_range_fails() {
    let dict = DictFile::new(WORDS);
    colcrack(&dict)
        .args([
            "crack",
            "--ciphertext",
            "ABC",
            "--min-key-size",
            "4",
            "--max-key-size",
            "3",
            "--no-oracle",
        ])
        .assert()
        .failure();
}

#[test]
fn test_encrypt_then_crack() {
    let dict = DictFile::new(WORDS);
    let output = colcrack(&dict)
        .args(["encrypt", "-p", "hellotheworld", "--key", "2,3,1"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let re = Regex::new(r"Ciphertext: (\S+)").unwrap();
    let ciphertext = re.captures(&stdout).unwrap()[1].to_string();

    let output = colcrack(&dict)
        .args(["crack", "--ciphertext", &ciphertext])
        .args(["--max-key-size", "3", "--no-oracle", "--json"])
        .output()
        .unwrap();
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["best"]["plaintext"], "hellotheworld");
    assert_eq!(report["best"]["key"], serde_json::json!([2, 3, 1]));
}

#[test]
fn test_zero_digit_key_rejected() {
    let dict = DictFile::new(WORDS);
    colcrack(&dict)
        .args(["encrypt", "--plaintext", "HELLO", "--key", "102"])
        .assert()
        .failure();
}
