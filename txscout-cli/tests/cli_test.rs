use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        fs::write(dir.path().join(name), content)?;
    }
    Ok(())
}

fn txscout() -> Result<Command> {
    let mut cmd = Command::cargo_bin("txscout")?;
    cmd.env_remove("RUST_LOG").arg("--no-color");
    Ok(cmd)
}

fn create_default_inputs(dir: &TempDir) -> Result<()> {
    create_test_files(
        dir,
        &[
            ("transmission1.txt", "abcd\nxyz\n"),
            ("transmission2.txt", "xyzab\ncd\n"),
            ("mcode1.txt", "cdx\n"),
            ("mcode2.txt", "zab\n"),
            ("mcode3.txt", "qq\n"),
        ],
    )
}

#[test]
fn test_analyze_default_files() -> Result<()> {
    let dir = tempdir()?;
    create_default_inputs(&dir)?;

    let output = txscout()?
        .args(["analyze", "-d", dir.path().to_str().unwrap()])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6 + 2 + 1 + 6);

    // Code search: transmission 1 then transmission 2
    assert_eq!(
        &lines[..6],
        &["found 3", "not-found", "not-found", "not-found", "found 3", "not-found"]
    );
    // Longest palindromes: no repeated neighbours, so the first symbol
    assert_eq!(&lines[6..8], &["1 1", "1 1"]);
    // Longest common substring in transmission 1
    assert_eq!(lines[8], "1 4");
    // "qq" uses a symbol neither transmission contains
    assert!(lines[11].starts_with("unencodable"));
    assert!(lines[14].starts_with("unencodable"));
    Ok(())
}

#[test]
fn test_analyze_explicit_files_json() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("a.txt", "babad"), ("b.txt", "dabab"), ("code.txt", "aba")],
    )?;

    txscout()?
        .args([
            "analyze",
            "-d",
            dir.path().to_str().unwrap(),
            "-t",
            "a.txt",
            "-t",
            "b.txt",
            "-c",
            "code.txt",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"common_substring\""))
        .stdout(predicate::str::contains("\"status\": \"found\""));
    Ok(())
}

#[test]
fn test_analyze_threshold_flag() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("t1.txt", "aaaaaaaaaaaaaaaaaaaabcde"),
            ("t2.txt", "aaaaaaaaaaaaaaaaaaaabcde"),
            ("rare.txt", "bcde"),
        ],
    )?;
    let root = dir.path().to_str().unwrap();
    let base = ["analyze", "-d", root, "-t", "t1.txt", "-t", "t2.txt", "-c", "rare.txt"];

    txscout()?
        .args(base)
        .assert()
        .success()
        .stdout(predicate::str::contains("suspicious 12"))
        .stdout(predicate::str::contains("not-suspicious").not());

    txscout()?
        .args(base)
        .args(["--threshold", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not-suspicious 12"));
    Ok(())
}

#[test]
fn test_cli_transmissions_override_config_file() -> Result<()> {
    let dir = tempdir()?;
    create_default_inputs(&dir)?;
    create_test_files(&dir, &[("one.yaml", "transmissions: [\"transmission1.txt\"]\n")])?;

    // The file alone names one transmission and is rejected
    txscout()?
        .current_dir(dir.path())
        .args(["analyze", "--config", "one.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 transmissions"));

    txscout()?
        .current_dir(dir.path())
        .args([
            "analyze",
            "--config",
            "one.yaml",
            "-t",
            "transmission1.txt",
            "-t",
            "transmission2.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 4"));
    Ok(())
}

#[test]
fn test_analyze_missing_file_fails() -> Result<()> {
    let dir = tempdir()?;

    txscout()?
        .args(["analyze", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
    Ok(())
}

#[test]
fn test_analyze_rejects_one_transmission() -> Result<()> {
    let dir = tempdir()?;
    create_default_inputs(&dir)?;

    txscout()?
        .args([
            "analyze",
            "-d",
            dir.path().to_str().unwrap(),
            "-t",
            "transmission1.txt",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 transmissions"));
    Ok(())
}

#[test]
fn test_search_first_and_all() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("text.txt", "ABAB\nAB\n")])?;
    let text = dir.path().join("text.txt");
    let text = text.to_str().unwrap();

    txscout()?
        .args(["search", text, "BA"])
        .assert()
        .success()
        .stdout("found 2\n");

    txscout()?
        .args(["search", text, "AB", "--all"])
        .assert()
        .success()
        .stdout("found 1\nfound 3\nfound 5\n");

    txscout()?
        .args(["search", text, "XYZ"])
        .assert()
        .success()
        .stdout("not-found\n");
    Ok(())
}

#[test]
fn test_search_pattern_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("text.txt", "xxABAByy"), ("code.txt", "AB\nAB\n")])?;

    txscout()?
        .args([
            "search",
            dir.path().join("text.txt").to_str().unwrap(),
            dir.path().join("code.txt").to_str().unwrap(),
            "--pattern-file",
        ])
        .assert()
        .success()
        .stdout("found 3\n");
    Ok(())
}
