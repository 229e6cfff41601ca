// integration tests for rule files applied to form snapshots

use formgate::config::{self, parse_rules};
use formgate::{Error, Form};
use tempfile::TempDir;

use crate::common::{fixed_clock, write_file};

const SIGNUP_FORM: &str = r#"{
    "fields": {
        "email": { "kind": "email", "value": "user@example.com" },
        "password": { "kind": "password", "value": "short" },
        "sku": { "value": "ABC-1234" },
        "birthday": { "kind": "date", "value": "2010-01-01" },
        "terms": { "kind": "checkbox", "value": "yes", "checked": true }
    },
    "groups": {
        "plan": {
            "kind": "radio",
            "items": [
                { "kind": "radio", "value": "free", "checked": false },
                { "kind": "radio", "value": "pro", "checked": true }
            ]
        },
        "interests": {
            "kind": "checkbox",
            "items": [
                { "kind": "checkbox", "value": "music", "checked": true },
                { "kind": "checkbox", "value": "books", "checked": false },
                { "kind": "checkbox", "value": "games", "checked": true }
            ]
        }
    }
}"#;

const SIGNUP_RULES: &str = r#"{
    patterns: { sku: "/^[a-z]{3}-\\d{4}$/i" },
    rules: [
        { name: "contact", target: "email", when: ["not_empty", "&&", "email"] },
        { target: "password", when: ["strong_password"] },
        { target: "sku", when: [{ pattern: "sku" }] },
        { name: "adult", target: "birthday", when: [{ months_ago: 216 }] },
        { target: "terms", when: ["checked"] },
        { target: "plan", when: [{ checked_value: "pro" }, "||", { checked_value: "team" }] },
        { target: "interests", quorum: 2, when: ["checked"] },
        { name: "no-books", target: "interests", when: [{ not: { checked_value: "books" } }], action: "else" },
    ],
}"#;

#[test]
fn test_signup_rules_against_snapshot() {
    let rules = parse_rules(SIGNUP_RULES).unwrap();
    let mut form = Form::from_json(SIGNUP_FORM).unwrap();

    let outcomes = form.apply_with_clock(&rules, fixed_clock()).unwrap();
    let summary: Vec<_> = outcomes
        .iter()
        .map(|o| (o.rule.as_str(), o.target.as_str(), o.enabled))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("contact", "email", true),
            ("password", "password", false),
            ("sku", "sku", true),
            ("adult", "birthday", false),
            ("terms", "terms", true),
            ("plan", "plan", true),
            ("interests", "interests", true),
            ("no-books", "interests", false),
        ]
    );
    assert_eq!(form.disabled_targets(), vec!["birthday", "password", "interests"]);
}

#[test]
fn test_rules_loaded_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "rules.json5", SIGNUP_RULES);

    let rules = config::load_rules(&path).unwrap();
    assert_eq!(rules.rules.len(), 8);
    assert!(config::verify(&path).unwrap().is_empty());
}

#[test]
fn test_missing_rules_file() {
    let dir = TempDir::new().unwrap();
    let err = config::load_rules(&dir.path().join("absent.json5")).unwrap_err();
    assert!(err.to_string().contains("rules file not found"));
}

#[test]
fn test_unknown_predicate_stops_apply() {
    let rules = parse_rules(r#"{ rules: [{ target: "email", when: ["emial"] }] }"#).unwrap();
    let mut form = Form::from_json(SIGNUP_FORM).unwrap();

    let err = form.apply(&rules).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.suggestions().iter().any(|s| s == "email"));
    assert!(form.disabled_targets().is_empty());
}

#[test]
fn test_verify_reports_every_problem() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "rules.json5",
        r#"{
            patterns: { broken: "([a-z" },
            rules: [
                { target: "", when: ["empty"] },
                { target: "email", when: ["emial"] },
                { target: "email", when: ["empty", "and"], action: "maybe" },
            ],
        }"#,
    );

    let errors = config::verify(&path).unwrap();
    assert_eq!(errors.len(), 5, "{:#?}", errors);
    assert!(errors[0].starts_with("patterns.broken"));
    assert!(errors[1].contains("'target' must not be empty"));
    assert!(errors[2].contains("did you mean: email"));
    assert!(errors[3].contains("invalid action 'maybe'"));
    assert!(errors[4].contains("ends with a connective"));
}

#[test]
fn test_rules_run_in_order_on_same_target() {
    let rules = parse_rules(
        r#"{ rules: [
            { target: "email", when: ["empty"] },
            { target: "email", when: ["not_empty"] },
        ] }"#,
    )
    .unwrap();
    let mut form = Form::from_json(SIGNUP_FORM).unwrap();

    let outcomes = form.apply(&rules).unwrap();
    assert!(!outcomes[0].enabled);
    assert!(outcomes[1].enabled);
    assert!(form.fields["email"].enabled);
}
