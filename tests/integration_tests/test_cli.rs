// end-to-end tests for the formgate binary

use tempfile::TempDir;

use crate::common::{json_output, run_formgate, run_formgate_with_env, stdout, write_file, FIXED_NOW};

const FORM: &str = r#"{
    "fields": {
        "email": { "kind": "email", "value": "user@example.com" },
        "nickname": { "value": "" }
    },
    "groups": {
        "tags": {
            "kind": "checkbox",
            "items": [
                { "kind": "checkbox", "value": "a", "checked": true },
                { "kind": "checkbox", "value": "b", "checked": false }
            ]
        }
    }
}"#;

const RULES: &str = r#"{
    rules: [
        { name: "contact", target: "email", when: ["not_empty", "and", "email"] },
        { target: "nickname", when: ["not_empty"] },
        { target: "tags", quorum: 1, when: ["checked"] },
    ],
}"#;

fn setup() -> (TempDir, String, String) {
    let dir = TempDir::new().unwrap();
    let form = write_file(dir.path(), "form.json", FORM);
    let rules = write_file(dir.path(), "rules.json5", RULES);
    (
        dir,
        form.to_string_lossy().to_string(),
        rules.to_string_lossy().to_string(),
    )
}

#[test]
fn test_predicates_text() {
    let output = run_formgate(&["predicates", "--no-json"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("prefix with not_ to negate"));
    assert!(text.contains("length_between"));
}

#[test]
fn test_predicates_names() {
    let output = run_formgate(&["predicates", "--names"]);
    assert!(output.status.success());
    let names: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert!(names.iter().any(|n| n == "email"));
    assert!(names.iter().any(|n| n == "strong_password"));
}

#[test]
fn test_eval_precedence_text() {
    let output = run_formgate(&[
        "eval",
        "--no-json",
        "--value",
        "5",
        r#"["empty", "and", {"equal": "x"}, "or", "number"]"#,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "enabled");
}

#[test]
fn test_eval_else_json() {
    let output = run_formgate(&["eval", "--json", "--value", "abc", "--else", r#"["number"]"#]);
    assert!(output.status.success());

    let json = json_output(&output);
    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["result"]["action"], "eval");
    assert_eq!(json["result"]["kind"], "text");
    assert_eq!(json["result"]["enabled"], true);
}

#[test]
fn test_eval_with_fixed_now() {
    let output = run_formgate(&[
        "eval",
        "--no-json",
        "--kind",
        "date",
        "--value",
        "2024-06-10",
        "--now",
        FIXED_NOW,
        "[{days_ago: 3}]",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "enabled");
}

#[test]
fn test_eval_unknown_predicate_json() {
    let output = run_formgate(&["eval", "--json", r#"["emtpy"]"#]);
    assert_eq!(output.status.code(), Some(5));

    let json = json_output(&output);
    assert_eq!(json["error"]["code"], -32005);
    let suggestions = json["error"]["data"]["suggestions"].as_array().unwrap();
    assert!(suggestions.iter().any(|s| s == "empty"));
}

#[test]
fn test_eval_invalid_now() {
    let output = run_formgate(&["eval", "--no-json", "--now", "tomorrow", r#"["empty"]"#]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid --now"));
}

#[test]
fn test_check_text_and_fail_disabled() {
    let (_dir, form, rules) = setup();

    let output = run_formgate(&["check", "--no-json", "--rules", &rules, "--form", &form]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("✓ email (contact)"));
    assert!(text.contains("✗ nickname"));
    assert!(text.contains("✓ tags"));

    let output = run_formgate(&[
        "check",
        "--quiet",
        "--rules",
        &rules,
        "--form",
        &form,
        "--fail-disabled",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_json() {
    let (_dir, form, rules) = setup();

    let output = run_formgate(&["check", "--json", "--rules", &rules, "--form", &form]);
    assert!(output.status.success());

    let json = json_output(&output);
    assert_eq!(json["result"]["disabled"], serde_json::json!(["nickname"]));
    let outcomes = json["result"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["rule"], "contact");
    assert_eq!(outcomes[0]["enabled"], true);
}

#[test]
fn test_check_unknown_target() {
    let dir = TempDir::new().unwrap();
    let form = write_file(dir.path(), "form.json", FORM);
    let rules = write_file(
        dir.path(),
        "rules.json5",
        r#"{ rules: [{ target: "phone", when: ["empty"] }] }"#,
    );

    let output = run_formgate(&[
        "check",
        "--no-json",
        "--rules",
        rules.to_str().unwrap(),
        "--form",
        form.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("phone"));
}

#[test]
fn test_rules_from_env_var() {
    let (_dir, form, rules) = setup();
    let output = run_formgate_with_env(
        &["check", "--no-json", "--form", &form],
        &[("FORMGATE_RULES", rules.as_str())],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("✗ nickname"));
}

#[test]
fn test_verify_valid_and_invalid() {
    let (dir, _form, rules) = setup();

    let output = run_formgate(&["verify", "--no-json", "--rules", &rules]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Rules are valid"));

    let broken = write_file(
        dir.path(),
        "broken.json5",
        r#"{ rules: [{ target: "email", when: ["emial", "or"] }] }"#,
    );
    let broken = broken.to_str().unwrap();

    let output = run_formgate(&["verify", "--no-json", "--rules", broken]);
    assert_eq!(output.status.code(), Some(5));
    let text = stdout(&output);
    assert!(text.contains("Rules have 1 error(s)"));
    assert!(text.contains("did you mean: email"));

    let output = run_formgate(&["verify", "--json", "--rules", broken]);
    assert_eq!(output.status.code(), Some(5));
    let json = json_output(&output);
    assert_eq!(json["error"]["code"], -32005);
    assert_eq!(json["error"]["data"]["details"].as_array().unwrap().len(), 1);
}

#[test]
fn test_verify_missing_rules_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json5");
    let output = run_formgate(&["verify", "--no-json", "--rules", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("rules file not found"));
}

#[test]
fn test_eval_rejects_out_of_range_meridiem_time() {
    let output = run_formgate(&[
        "eval",
        "--no-json",
        "--kind",
        "time",
        "--value",
        "65535PM",
        "--now",
        FIXED_NOW,
        r#"[{"hours_later": 1}]"#,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "disabled");
}
