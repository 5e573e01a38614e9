/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/analysis-result.json";

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("evaluated-model").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("evaluated-model")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 1: severe findings with --fail-on-severe
    #[test]
    fn test_exit_code_severe_findings() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "--fail-on-severe"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("severe threshold"));
    }

    /// Exit code 0: severe findings are only reported without --fail-on-severe
    #[test]
    fn test_exit_code_severe_findings_without_flag() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "--severe-issue-threshold", "hint"])
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("evaluated-model")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "-f", "markdown"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent input
    #[test]
    fn test_exit_code_application_error_nonexistent_input() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", "/nonexistent/analysis-result.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("An error occurred"));
    }

    /// Exit code 3: Application error - analyzer issues for an unknown id
    #[test]
    fn test_exit_code_application_error_unknown_issue_owner() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("analysis-result.json");
        fs::write(
            &input,
            r#"{
  "projects": [{ "id": "NPM::app:1.0.0", "definition_file_path": "package.json" }],
  "issues": {
    "NPM::ghost:0.0.1": [
      { "timestamp": "2024-03-01T10:00:00Z", "source": "NPM", "message": "lost", "severity": "ERROR" }
    ]
  }
}"#,
        )
        .unwrap();

        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", input.to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Data integrity violation"))
            .stderr(predicate::str::contains("NPM::ghost:0.0.1"));
    }
}

mod output_tests {
    use super::*;

    #[test]
    fn test_json_output_is_graph_as_table() {
        let output = cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE])
            .output()
            .unwrap();

        assert!(output.status.success());
        let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        assert_eq!(document["format_version"], 1);
        assert_eq!(document["packages"].as_array().unwrap().len(), 4);
        assert_eq!(document["licenses"].as_array().unwrap().len(), 1);
        assert_eq!(document["declared_license_stats"]["MIT"], 4);
        assert_eq!(document["detected_license_stats"]["MIT"], 2);
        assert_eq!(document["labels"]["team"], "platform");
        assert_eq!(document["custom_data"]["pipeline"]["id"], 42);

        // The scanner issue points back at its package and scan result by id
        let scanner_issue = document["issues"]
            .as_array()
            .unwrap()
            .iter()
            .find(|issue| issue["type"] == "SCANNER")
            .unwrap();
        assert!(scanner_issue["pkg"].is_u64());
        assert!(scanner_issue["scan_result"].is_u64());
    }

    #[test]
    fn test_excluded_scope_marks_package_excluded() {
        let output = cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE])
            .output()
            .unwrap();
        let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        let jest = document["packages"]
            .as_array()
            .unwrap()
            .iter()
            .find(|package| package["id"] == "NPM::jest:29.7.0")
            .unwrap();
        assert_eq!(jest["is_excluded"], true);
        assert_eq!(jest["scope_excludes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_yaml_output() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "-f", "yaml"])
            .assert()
            .code(0)
            .stdout(predicate::str::starts_with("format_version: 1"));
    }

    #[test]
    fn test_pretty_json_output() {
        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "--pretty"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\n  \"format_version\": 1"));
    }

    #[test]
    fn test_yaml_input() {
        let dir = TempDir::new().unwrap();
        let json = fs::read_to_string(fixtures_path().join("analysis-result.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let input = dir.path().join("analysis-result.yml");
        fs::write(&input, serde_yaml_ng::to_string(&value).unwrap()).unwrap();

        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", input.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\"format_version\":1"));
    }
}

mod decode_tests {
    use super::*;

    #[test]
    fn test_build_to_file_then_decode() {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("model.yaml");

        cargo_bin_cmd!("evaluated-model")
            .args(["build", "-i", FIXTURE, "-o", model_path.to_str().unwrap(), "-f", "yaml"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Model written to:"));

        cargo_bin_cmd!("evaluated-model")
            .args(["decode", "-i", model_path.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("projects: 1"))
            .stdout(predicate::str::contains("packages: 4"))
            .stdout(predicate::str::contains("rule violations: 1 (1 open)"))
            .stdout(predicate::str::contains("declared MIT: 4"));
    }

    #[test]
    fn test_decode_rejects_malformed_document() {
        let dir = TempDir::new().unwrap();
        let model_path = dir.path().join("model.json");
        fs::write(
            &model_path,
            r#"{"format_version": 1, "packages": [{"_id": 0, "id": "NPM::a:1.0", "issues": [7]}]}"#,
        )
        .unwrap();

        cargo_bin_cmd!("evaluated-model")
            .args(["decode", "-i", model_path.to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("unknown issue id 7"));
    }
}
