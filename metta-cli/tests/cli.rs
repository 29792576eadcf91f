use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mettahl(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("mettahl");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn highlights_stdin_as_tokens() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .args(["--format", "tokens"])
        .write_stdin("($x &space)")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("bracket-open(0)\t\"(\"")
                .and(predicate::str::contains("variable\t\"$x\""))
                .and(predicate::str::contains("namespace-ref\t\"&space\""))
                .and(predicate::str::contains("bracket-close(0)\t\")\"")),
        );
}

#[test]
fn highlights_file_as_html() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo.metta");
    fs::write(&path, "(: foo Type)").unwrap();

    mettahl(&dir)
        .arg(&path)
        .args(["--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<span class=\"token bracket-open paren-level-0\">(</span>",
        ));
}

#[test]
fn local_config_selects_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".mettahl.toml"), "[render]\nformat = \"json\"\n").unwrap();

    mettahl(&dir)
        .write_stdin("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"number\""));
}

#[test]
fn explicit_config_file_is_layered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[highlight]\nkeywords = [\"let\"]\n").unwrap();

    mettahl(&dir)
        .arg("--config")
        .arg(&path)
        .args(["--format", "tokens"])
        .write_stdin("(let $x 1)")
        .assert()
        .success()
        .stdout(predicate::str::contains("keyword\t\"let\""));
}

#[test]
fn line_numbers_wrap_lines() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .args(["--format", "html", "--line-numbers"])
        .write_stdin("a\nb")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("data-line=\"1\"").and(predicate::str::contains("data-line=\"2\"")),
        );
}

#[test]
fn document_mode_renders_blocks() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .arg("--document")
        .write_stdin("Intro\n```metta\n(f)\n```\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<p>Intro</p>")
                .and(predicate::str::contains("<code class=\"language-metta\">")),
        );
}

#[test]
fn check_reports_problems() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .arg("--check")
        .write_stdin("(a\n))")
        .assert()
        .code(2)
        .stdout("2:2: unmatched closing parenthesis\n");
}

#[test]
fn check_passes_balanced_input() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .arg("--check")
        .write_stdin("(a (b))")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .args(["--format", "pdf"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'pdf' not found"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .arg("does-not-exist.metta")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot read does-not-exist.metta"));
}

#[test]
fn lists_formats() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .arg("--list-formats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ansi")
                .and(predicate::str::contains("html"))
                .and(predicate::str::contains("yaml")),
        );
}

#[test]
fn line_numbers_count_source_lines() {
    let dir = TempDir::new().unwrap();
    mettahl(&dir)
        .args(["--format", "html", "--line-numbers"])
        .write_stdin("\"a\nb\"\nx")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("data-line=\"3\"")
                .and(predicate::str::contains("data-line=\"2\"").not()),
        );
}
