//! End-to-end tests for the `secret-santa` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const FAMILY_JSON: &str = r#"{
    "participants": [
        {"name": "babeth", "email": "babeth@example.org"},
        {"name": "claude", "email": "claude@example.org"},
        {"name": "johan", "email": "johan@example.org"},
        {"name": "julia", "email": "julia@example.org"},
        {"name": "louise", "email": "louise@example.org"},
        {"name": "morgane", "email": "morgane@example.org"},
        {"name": "tom", "email": "tom@example.org"}
    ],
    "exclusions": [["johan", "louise"]]
}"#;

const COUPLE_TSV: &str = "name\temail\tpartner
a\ta@example.org\tb
b\tb@example.org\ta
";

fn write_roster(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn santa() -> Command {
    Command::cargo_bin("secret-santa").unwrap()
}

#[test]
fn test_draw_dry_run_previews_every_message() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.json", FAMILY_JSON);

    santa()
        .args(["draw", "--dry-run", "--seed", "2002"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: Your secret santa match!").count(7))
        .stdout(predicate::str::contains("To: louise@example.org"))
        .stdout(predicate::str::contains("Cycle with"))
        .stdout(predicate::str::contains("Dry run: 7 messages previewed, none sent."));
}

#[test]
fn test_draw_same_seed_same_messages() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.json", FAMILY_JSON);

    let run = || {
        let output = santa()
            .args(["draw", "--dry-run", "--seed", "42"])
            .arg(&roster)
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .filter(|line| !line.starts_with("Date:"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    assert_eq!(run(), run());
}

#[test]
fn test_draw_infeasible_couple() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "couple.tsv", COUPLE_TSV);

    santa()
        .args(["draw", "--dry-run"])
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete matching"));
}

#[test]
fn test_draw_exclusion_from_command_line() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(
        &dir,
        "trio.csv",
        "a,a@example.org\nb,b@example.org\nc,c@example.org\n",
    );

    // Without exclusions three people always form a single 3-cycle
    santa()
        .args(["draw", "--dry-run", "--format", "json"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"participants\": 3"));

    // Excluding a and b leaves both of them needing c
    santa()
        .args(["draw", "--dry-run", "--exclude", "a:b"])
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete matching"));
}

#[test]
fn test_draw_unknown_exclusion() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.json", FAMILY_JSON);

    santa()
        .args(["draw", "--dry-run", "-x", "tom:santa"])
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown participant 'santa'"));
}

#[cfg(unix)]
#[test]
fn test_draw_transport_failure() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.json", FAMILY_JSON);

    santa()
        .args(["draw", "--sendmail", "false"])
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mail transport failed"));
}

#[test]
fn test_check_feasible_json() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.json", FAMILY_JSON);

    santa()
        .args(["check", "--format", "json"])
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"feasible\": true"))
        .stdout(predicate::str::contains("\"matched\": 7"))
        .stdout(predicate::str::contains("@example.org").not());
}

#[test]
fn test_check_infeasible_text() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "couple.tsv", COUPLE_TSV);

    santa()
        .arg("check")
        .arg(&roster)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Feasible: no"))
        .stdout(predicate::str::contains("Left without a giver: a, b"))
        .stderr(predicate::str::contains("only 0 of 2 participants"));
}

#[test]
fn test_unsupported_roster_format() {
    let dir = TempDir::new().unwrap();
    let roster = write_roster(&dir, "family.yaml", "participants: []");

    santa()
        .arg("check")
        .arg(&roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported roster format"));
}
