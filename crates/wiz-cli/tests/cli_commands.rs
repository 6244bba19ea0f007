//! End-to-end runs of the `wiz` binary in a scratch directory.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn wiz(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wiz"))
        .args(args)
        .current_dir(dir)
        .env_remove("WIZ_LOG")
        .env_remove("WIZ_VALIDATION__PATH_STYLE")
        .env_remove("WIZ_VALIDATION__ALLOW_UNKNOWN")
        .env_remove("WIZ_VALIDATION__FIELD_CONTEXT")
        .env_remove("WIZ_LOGGING__LEVEL")
        .output()
        .expect("wiz should run")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), value.to_string()).expect("write fixture");
}

#[test]
fn validate_reports_all_errors_and_exits_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "doc.json",
        &json!({"projectName": "ab", "dailyBudget": 1, "bidStrategy": "cpc", "keywords": "x",
                "categoryGroups": [{"name": "", "cpc": 1}]}),
    );

    let out = wiz(dir.path(), &["validate", "--source", "primary", "doc.json"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        stdout_json(&out),
        json!({
            "isValid": false,
            "errors": {
                "projectName": "Project name must be at least 3 characters",
                "dailyBudget": "Daily budget must be at least $5",
                "categoryGroups[0].name": "Category group name is required"
            }
        })
    );
}

#[test]
fn validate_valid_document_exits_0() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "doc.json",
        &json!({"projectName": "Native", "targetUrl": "https://example.com", "bidAmount": 0.05,
                "dailyBudget": 10, "targeting": {"countries": ["US"]}}),
    );

    let out = wiz(dir.path(), &["validate", "-s", "secondary", "doc.json", "--format", "raw"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), r#"{"isValid":true,"errors":{}}"#);
}

#[test]
fn unknown_source_is_a_result_not_a_crash() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "doc.json", &json!({}));

    let out = wiz(dir.path(), &["validate", "-s", "doesnotexist", "doc.json"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        stdout_json(&out),
        json!({"isValid": false, "errors": {"general": "Invalid data source"}})
    );
}

#[test]
fn field_uses_document_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "doc.json", &json!({"bidding": {"strategy": "manual"}}));

    let out = wiz(
        dir.path(),
        &["field", "-s", "tertiary", "--path", "bidding.amount", "--document", "doc.json"],
    );
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(
        stdout_json(&out),
        json!({"isValid": false, "error": "Bid amount is required for manual bidding"})
    );

    let out = wiz(
        dir.path(),
        &["field", "-s", "tertiary", "--path", "bidding.amount", "--value", "0.5", "--document", "doc.json"],
    );
    assert!(out.status.success());
}

#[test]
fn project_config_switches_path_style() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join(".wiz")).expect("mkdir");
    std::fs::write(
        dir.path().join(".wiz/config.toml"),
        "[validation]\npath_style = \"dotted\"\n",
    )
    .expect("write config");
    write(dir.path(), "tree.json", &json!({"groups": [{"name": "Required"}]}));

    let out = wiz(dir.path(), &["flatten", "tree.json"]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), json!({"groups.0.name": "Required"}));
}

#[test]
fn sources_lists_top_level_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = wiz(dir.path(), &["sources"]);
    assert!(out.status.success());
    let listed = stdout_json(&out);
    assert_eq!(listed[0]["source"], "primary");
    assert_eq!(listed[0]["fields"][0], "projectName");
    assert_eq!(listed.as_array().map(Vec::len), Some(3));
}

#[test]
fn schema_exports_json_schema_and_skeleton() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = wiz(dir.path(), &["schema", "tertiary"]);
    assert!(out.status.success());
    let schema = stdout_json(&out);
    assert_eq!(schema["title"], "tertiary");
    assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");

    let out = wiz(dir.path(), &["schema", "primary", "--skeleton"]);
    assert_eq!(stdout_json(&out)["categoryGroups"], json!([]));

    let out = wiz(dir.path(), &["schema", "--response", "field"]);
    assert!(out.status.success());
    assert!(stdout_json(&out)["properties"]["isValid"].is_object());
}

#[test]
fn missing_file_fails_with_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = wiz(dir.path(), &["validate", "-s", "primary", "missing.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("wiz error: failed to read missing.json"));
}
