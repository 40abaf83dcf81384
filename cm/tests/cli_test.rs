//! Integration tests for the `cm` binary
//!
//! Every test runs with an explicit config so user catalogs and colors never
//! leak in.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GREETING_CATALOG: &str = r#"
- id: greet
  title: Greeting
  fields:
    - id: name
      label: Name
      required: true
    - id: note
      label: Note
      kind: textarea
  template: "Hi {{name}}{{#if note}}, {{note}}{{/if}}!"
"#;

fn write_config(dir: &Path, catalog_paths: &[&str]) -> PathBuf {
    let mut yaml = String::from("catalog:\n  paths:\n");
    for p in catalog_paths {
        yaml.push_str(&format!("    - \"{}\"\n", p));
    }
    yaml.push_str("output:\n  color: false\n  next-steps: false\n");
    let path = dir.join("cometmastery.yml");
    fs::write(&path, yaml).expect("Failed to write config");
    path
}

fn builtin_env() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), &["builtin"]);
    (temp, config)
}

fn greeting_env() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let catalog = temp.path().join("greeting.yml");
    fs::write(&catalog, GREETING_CATALOG).expect("Failed to write catalog");
    let config = write_config(temp.path(), &[&catalog.to_string_lossy()]);
    (temp, config)
}

fn cm(temp: &TempDir, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cm").expect("cm binary should build");
    cmd.current_dir(temp.path()).arg("-c").arg(config);
    cmd
}

// =============================================================================
// Catalog browsing
// =============================================================================

#[test]
fn test_list_shows_builtin_use_cases() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("real-time-analysis"))
        .stdout(predicate::str::contains("Lead Follow-Up Automation"))
        .stdout(predicate::str::contains("custom-prompt"));
}

#[test]
fn test_list_json() {
    let (temp, config) = builtin_env();
    let output = cm(&temp, &config).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[2]["id"], "expired-fsbo");
    assert_eq!(entries[2]["title"], "Expired/FSBO Conversion");
}

#[test]
fn test_show_lists_fields() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .args(["show", "lead-followup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("touchpoints (number, required)"))
        .stdout(predicate::str::contains("Warm & Friendly"))
        .stdout(predicate::str::contains("example: e.g., $450K"));
}

#[test]
fn test_show_unknown_use_case_fails() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .args(["show", "open-house"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown use case: open-house"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_drops_empty_conditional() {
    let (temp, config) = greeting_env();
    cm(&temp, &config)
        .args(["render", "greet", "--set", "name=Sam"])
        .assert()
        .success()
        .stdout("Hi Sam!\n");
}

#[test]
fn test_render_keeps_filled_conditional() {
    let (temp, config) = greeting_env();
    cm(&temp, &config)
        .args(["render", "greet", "-s", "name=Sam", "-s", "note=welcome back"])
        .assert()
        .success()
        .stdout("Hi Sam, welcome back!\n");
}

#[test]
fn test_render_builtin_use_case() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .args([
            "render",
            "expired-fsbo",
            "--set",
            "listingType=1",
            "--set",
            "address=123 Main St, Miami Beach, FL",
            "--set",
            "listPrice=$750,000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Write a personalized outreach letter/email to the owner of 123 Main St, Miami Beach, FL, a Expired Listing.",
        ))
        .stdout(predicate::str::contains("Original List Price: $750,000"))
        .stdout(predicate::str::contains("Days on Market").not())
        .stdout(predicate::str::contains("{{").not());
}

#[test]
fn test_render_missing_required_field() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .args(["render", "expired-fsbo", "--set", "listingType=Expired Listing"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Please fill in: Property Address"));
}

#[test]
fn test_render_rejects_unknown_field() {
    let (temp, config) = greeting_env();
    cm(&temp, &config)
        .args(["render", "greet", "--set", "name=Sam", "--set", "nmae=typo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field 'nmae'"));
}

#[test]
fn test_render_values_file_with_override_as_json() {
    let (temp, config) = greeting_env();
    let values = temp.path().join("values.yml");
    fs::write(&values, "name: Alex\nnote: see you soon\n").unwrap();

    let output = cm(&temp, &config)
        .args(["render", "greet", "--values"])
        .arg(&values)
        .args(["--set", "name=Sam", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["use_case"], "greet");
    assert_eq!(doc["values"]["name"], "Sam");
    assert_eq!(doc["values"]["note"], "see you soon");
    assert_eq!(doc["prompt"], "Hi Sam, see you soon!");
}

#[test]
fn test_render_to_output_file() {
    let (temp, config) = greeting_env();
    let out = temp.path().join("prompt.txt");

    cm(&temp, &config)
        .args(["render", "greet", "--set", "name=Sam", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote prompt to"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "Hi Sam!\n");
}

// =============================================================================
// Catalog checks
// =============================================================================

#[test]
fn test_check_builtin_is_clean() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 use cases, no issues"));
}

#[test]
fn test_check_reports_authoring_issues() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("broken.yml");
    fs::write(
        &catalog,
        "id: broken\ntitle: Broken\nfields:\n  - id: name\n    label: Name\ntemplate: \"{{nmae}} {{#if name}}open\"\n",
    )
    .unwrap();
    let config = write_config(temp.path(), &[&catalog.to_string_lossy()]);

    cm(&temp, &config)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown field 'nmae'"))
        .stdout(predicate::str::contains("1 unclosed #if"))
        .stderr(predicate::str::contains("2 catalog issue(s) found"))
        .stderr(predicate::str::contains("Catalog issue").not());
}

#[test]
fn test_render_warns_about_authoring_issues() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("broken.yml");
    fs::write(
        &catalog,
        "id: broken\ntitle: Broken\nfields:\n  - id: name\n    label: Name\ntemplate: \"Hi {{name}} {{nmae}}\"\n",
    )
    .unwrap();
    let config = write_config(temp.path(), &[&catalog.to_string_lossy()]);

    cm(&temp, &config)
        .args(["render", "broken", "--set", "name=Sam"])
        .assert()
        .success()
        .stdout("Hi Sam {{nmae}}\n")
        .stderr(predicate::str::contains("Catalog issue"))
        .stderr(predicate::str::contains("unknown field 'nmae'"));
}

#[test]
fn test_render_required_number_left_at_example_fails() {
    let (temp, config) = builtin_env();
    cm(&temp, &config)
        .args([
            "render",
            "lead-followup",
            "--set",
            "leadType=Seller Lead",
            "--set",
            "leadSituation=Asked about listing next spring",
            "--set",
            "tone=3",
            "--set",
            "timeframe=30 days",
            "--set",
            "touchpoints=5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in: Number of Touchpoints"));
}

// =============================================================================
// Interactive fill over piped input
// =============================================================================

#[test]
fn test_fill_reads_answers_from_stdin() {
    let (temp, config) = greeting_env();
    cm(&temp, &config)
        .args(["fill", "greet"])
        .write_stdin("Sam\nwelcome back\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi Sam, welcome back!"));
}
