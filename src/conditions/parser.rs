//! rule step parser - converts JSON steps to checks and connectives
//!
//! supports:
//! - bare predicate names: "empty", "email", "checked"
//! - negation: "not_empty", {"not": step}
//! - connectives: "and", "&&", "or", "||"
//! - predicates with arguments: {"equal": "x"}, {"length_between": [2, 8]}
//! - named patterns: {"pattern": "sku"}, falling back to built-in classifiers
//! - custom regexes: {"matches": "^\\d+$"} or {"matches": "/^abc$/i"}

use std::collections::{BTreeMap, HashMap};

use regex::{Regex, RegexBuilder};
use serde_json::Value as JsonValue;
use strsim::levenshtein;

use super::check::{Check, CATALOG};
use super::patterns::Pattern;
use super::types::Token;
use crate::error::{Error, Result};

/// named patterns compiled from a rule file
pub type PatternDefinitions = HashMap<String, Regex>;

/// one parsed rule step
#[derive(Debug, Clone)]
pub enum Step {
    Check(Check),
    Connective(Token),
}

/// parse a step list (or a single step) into checks and connectives
///
/// structural validity of the connective sequence is left to resolution
pub fn parse_steps(
    json: &JsonValue,
    patterns: &PatternDefinitions,
    path: &str,
) -> Result<Vec<Step>> {
    match json {
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_step(item, patterns, &format!("{}[{}]", path, i)))
            .collect(),
        other => Ok(vec![parse_step(other, patterns, path)?]),
    }
}

fn parse_step(json: &JsonValue, patterns: &PatternDefinitions, path: &str) -> Result<Step> {
    if let JsonValue::String(s) = json {
        if let Some(token) = Token::parse_connective(s) {
            return Ok(Step::Connective(token));
        }
    }
    parse_check(json, patterns, path).map(Step::Check)
}

/// parse a single predicate description
pub fn parse_check(json: &JsonValue, patterns: &PatternDefinitions, path: &str) -> Result<Check> {
    match json {
        JsonValue::String(name) => parse_named(name, None, patterns, path),
        JsonValue::Object(obj) => {
            if obj.len() != 1 {
                return Err(Error::parse(
                    path,
                    format!("expected exactly one predicate, got {} keys", obj.len()),
                ));
            }
            let Some((name, arg)) = obj.iter().next() else {
                return Err(Error::parse(path, "empty predicate object"));
            };
            let arg_path = format!("{}.{}", path, name);
            if name == "not" {
                let inner = parse_check(arg, patterns, &arg_path)?;
                return Ok(Check::Not(Box::new(inner)));
            }
            parse_named(name, Some(arg), patterns, &arg_path)
        }
        other => Err(Error::parse(
            path,
            format!("expected predicate name or object, got {}", other),
        )),
    }
}

fn parse_named(
    name: &str,
    arg: Option<&JsonValue>,
    patterns: &PatternDefinitions,
    path: &str,
) -> Result<Check> {
    if let Some(positive) = name.strip_prefix("not_") {
        return parse_named(positive, arg, patterns, path).map(|c| Check::Not(Box::new(c)));
    }

    let check = match name {
        "empty" => Check::Empty,
        "number" => Check::Number,
        "selected" => Check::Selected,
        "checked" => Check::Checked,
        "any_checked" => Check::AnyChecked,
        "equal" => Check::Equal(text_arg(name, arg, path)?),
        "includes" => Check::Includes(text_arg(name, arg, path)?),
        "greater_value" => Check::GreaterValue(text_arg(name, arg, path)?),
        "less_value" => Check::LessValue(text_arg(name, arg, path)?),
        "value_between" => {
            let (start, end) = pair_arg(name, arg, path, |v, p| text_value(name, v, p))?;
            Check::ValueBetween(start, end)
        }
        "greater_length" => Check::GreaterLength(count_arg(name, arg, path)?),
        "less_length" => Check::LessLength(count_arg(name, arg, path)?),
        "length_between" => {
            let (start, end) = pair_arg(name, arg, path, |v, p| count_value(name, v, p))?;
            Check::LengthBetween(start, end)
        }
        "greater_files" => Check::GreaterFiles(count_arg(name, arg, path)?),
        "less_files" => Check::LessFiles(count_arg(name, arg, path)?),
        "files_between" => {
            let (start, end) = pair_arg(name, arg, path, |v, p| count_value(name, v, p))?;
            Check::FilesBetween(start, end)
        }
        "selected_value" => Check::SelectedValue(text_arg(name, arg, path)?),
        "checked_value" => Check::CheckedValue(text_arg(name, arg, path)?),
        "months_ago" => Check::MonthsAgo(months_arg(name, arg, path)?),
        "months_later" => Check::MonthsLater(months_arg(name, arg, path)?),
        "days_ago" => Check::DaysAgo(int_arg(name, arg, path)?),
        "days_later" => Check::DaysLater(int_arg(name, arg, path)?),
        "date_ago" => Check::DateAgo(text_arg(name, arg, path)?),
        "date_later" => Check::DateLater(text_arg(name, arg, path)?),
        "hours_ago" => Check::HoursAgo(int_arg(name, arg, path)?),
        "hours_later" => Check::HoursLater(int_arg(name, arg, path)?),
        "minutes_ago" => Check::MinutesAgo(int_arg(name, arg, path)?),
        "minutes_later" => Check::MinutesLater(int_arg(name, arg, path)?),
        "time_ago" => Check::TimeAgo(text_arg(name, arg, path)?),
        "time_later" => Check::TimeLater(text_arg(name, arg, path)?),
        "matches" => Check::Matches(compile_regex(&text_arg(name, arg, path)?)?),
        "pattern" => {
            let pattern = text_arg(name, arg, path)?;
            if let Some(regex) = patterns.get(&pattern) {
                Check::Matches(regex.clone())
            } else if let Some(builtin) = Pattern::parse(&pattern) {
                Check::Pattern(builtin)
            } else {
                let known: Vec<&str> = patterns
                    .keys()
                    .map(String::as_str)
                    .chain(Pattern::ALL.iter().map(|p| p.name()))
                    .collect();
                return Err(Error::parse_with_suggestions(
                    path,
                    format!("undefined pattern: {}", pattern),
                    suggest(&pattern, known),
                ));
            }
        }
        other => match Pattern::parse(other) {
            Some(pattern) => Check::Pattern(pattern),
            None => {
                return Err(Error::parse_with_suggestions(
                    path,
                    format!("unknown predicate: {}", other),
                    suggest(other, predicate_names()),
                ))
            }
        },
    };

    // argument-less predicates must not carry one
    if arg.is_some() && takes_no_argument(name) {
        return Err(Error::parse(path, format!("'{}' takes no argument", name)));
    }
    Ok(check)
}

fn takes_no_argument(name: &str) -> bool {
    matches!(
        name,
        "empty" | "number" | "selected" | "checked" | "any_checked"
    ) || Pattern::parse(name).is_some()
}

/// every name accepted as a bare or keyed predicate
pub fn predicate_names() -> Vec<&'static str> {
    CATALOG
        .iter()
        .map(|(name, _)| *name)
        .chain(Pattern::ALL.iter().map(|p| p.name()))
        .collect()
}

/// closest known names by edit distance
fn suggest<'a>(query: &str, known: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let max_distance = (query.len() / 3).max(2);
    let mut scored: Vec<(usize, &str)> = known
        .into_iter()
        .map(|name| (levenshtein(query, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// compile a regex; `/pattern/` and `/pattern/i` select case sensitivity
pub fn compile_regex(source: &str) -> Result<Regex> {
    let (pattern, case_insensitive) = match parse_regex_literal(source) {
        Some((pattern, ci)) => (pattern, ci),
        None => (source, false),
    };
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })
}

fn parse_regex_literal(source: &str) -> Option<(&str, bool)> {
    let body = source.strip_prefix('/')?;
    if let Some(pattern) = body.strip_suffix("/i") {
        (!pattern.is_empty()).then_some((pattern, true))
    } else {
        body.strip_suffix('/')
            .filter(|p| !p.is_empty())
            .map(|p| (p, false))
    }
}

/// compile the `patterns` table of a rule file
pub fn compile_patterns(sources: &BTreeMap<String, String>) -> Result<PatternDefinitions> {
    sources
        .iter()
        .map(|(name, source)| compile_regex(source).map(|regex| (name.clone(), regex)))
        .collect()
}

fn require<'v>(name: &str, arg: Option<&'v JsonValue>, path: &str) -> Result<&'v JsonValue> {
    arg.ok_or_else(|| Error::parse(path, format!("'{}' requires an argument", name)))
}

fn text_value(name: &str, value: &JsonValue, path: &str) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(Error::parse(
            path,
            format!("'{}' expects text or a number, got {}", name, other),
        )),
    }
}

fn count_value(name: &str, value: &JsonValue, path: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::parse(
                path,
                format!("'{}' expects a non-negative integer, got {}", name, value),
            )
        })
}

fn text_arg(name: &str, arg: Option<&JsonValue>, path: &str) -> Result<String> {
    text_value(name, require(name, arg, path)?, path)
}

fn count_arg(name: &str, arg: Option<&JsonValue>, path: &str) -> Result<usize> {
    count_value(name, require(name, arg, path)?, path)
}

fn int_arg(name: &str, arg: Option<&JsonValue>, path: &str) -> Result<i64> {
    let value = require(name, arg, path)?;
    value
        .as_i64()
        .ok_or_else(|| Error::parse(path, format!("'{}' expects an integer, got {}", name, value)))
}

fn months_arg(name: &str, arg: Option<&JsonValue>, path: &str) -> Result<i32> {
    let months = int_arg(name, arg, path)?;
    i32::try_from(months)
        .map_err(|_| Error::parse(path, format!("'{}' is out of range: {}", name, months)))
}

fn pair_arg<V>(
    name: &str,
    arg: Option<&JsonValue>,
    path: &str,
    item: impl Fn(&JsonValue, &str) -> Result<V>,
) -> Result<(V, V)> {
    match require(name, arg, path)? {
        JsonValue::Array(items) if items.len() == 2 => Ok((
            item(&items[0], &format!("{}[0]", path))?,
            item(&items[1], &format!("{}[1]", path))?,
        )),
        other => Err(Error::parse(
            path,
            format!("'{}' expects [start, end], got {}", name, other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(json: JsonValue) -> Result<Vec<Step>> {
        parse_steps(&json, &PatternDefinitions::new(), "when")
    }

    fn single(json: JsonValue) -> Check {
        match parse(json).unwrap().remove(0) {
            Step::Check(check) => check,
            Step::Connective(t) => panic!("expected check, got {}", t),
        }
    }

    #[test]
    fn test_parse_bare_names() {
        assert!(matches!(single(json!("empty")), Check::Empty));
        assert!(matches!(single(json!("checked")), Check::Checked));
        assert!(matches!(
            single(json!("email")),
            Check::Pattern(Pattern::Email)
        ));
    }

    #[test]
    fn test_parse_connectives() {
        let steps = parse(json!(["empty", "and", "number", "||", "checked"])).unwrap();
        assert_eq!(steps.len(), 5);
        assert!(matches!(steps[1], Step::Connective(Token::And)));
        assert!(matches!(steps[3], Step::Connective(Token::Or)));
    }

    #[test]
    fn test_parse_single_step_without_array() {
        let steps = parse(json!("not_empty")).unwrap();
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_parse_negation_forms() {
        match single(json!("not_empty")) {
            Check::Not(inner) => assert!(matches!(*inner, Check::Empty)),
            other => panic!("unexpected {}", other),
        }
        match single(json!({"not_equal": "x"})) {
            Check::Not(inner) => assert!(matches!(*inner, Check::Equal(ref s) if s == "x")),
            other => panic!("unexpected {}", other),
        }
        match single(json!({"not": {"length_between": [1, 3]}})) {
            Check::Not(inner) => assert!(matches!(*inner, Check::LengthBetween(1, 3))),
            other => panic!("unexpected {}", other),
        }
    }

    #[test]
    fn test_parse_arguments() {
        assert!(matches!(single(json!({"equal": 5})), Check::Equal(ref s) if s == "5"));
        assert!(matches!(
            single(json!({"value_between": ["a", "m"]})),
            Check::ValueBetween(ref a, ref b) if a == "a" && b == "m"
        ));
        assert!(matches!(single(json!({"days_ago": 30})), Check::DaysAgo(30)));
        assert!(matches!(
            single(json!({"months_later": -2})),
            Check::MonthsLater(-2)
        ));
        assert!(matches!(
            single(json!({"checked_value": "kr"})),
            Check::CheckedValue(ref v) if v == "kr"
        ));
    }

    #[test]
    fn test_parse_argument_errors() {
        assert!(parse(json!("equal")).is_err());
        assert!(parse(json!({"greater_length": -1})).is_err());
        assert!(parse(json!({"length_between": [1]})).is_err());
        assert!(parse(json!({"empty": true})).is_err());
        assert!(parse(json!({"equal": "a", "includes": "b"})).is_err());
        assert!(parse(json!(42)).is_err());
    }

    #[test]
    fn test_parse_named_pattern() {
        let mut patterns = PatternDefinitions::new();
        patterns.insert("sku".to_string(), Regex::new(r"^[A-Z]{3}-\d{4}$").unwrap());

        let steps = parse_steps(&json!([{"pattern": "sku"}]), &patterns, "when").unwrap();
        match &steps[0] {
            Step::Check(Check::Matches(re)) => assert!(re.is_match("ABC-1234")),
            other => panic!("unexpected {:?}", other),
        }

        // built-in classifiers are reachable through the same key
        let steps = parse_steps(&json!({"pattern": "kanji"}), &patterns, "when").unwrap();
        assert!(matches!(steps[0], Step::Check(Check::Pattern(Pattern::Kanji))));

        let err = parse_steps(&json!({"pattern": "skus"}), &patterns, "when").unwrap_err();
        assert!(err.suggestions().contains(&"sku".to_string()));
    }

    #[test]
    fn test_parse_matches() {
        match single(json!({"matches": "/^abc$/i"})) {
            Check::Matches(re) => assert!(re.is_match("ABC")),
            other => panic!("unexpected {}", other),
        }
        match single(json!({"matches": "^abc$"})) {
            Check::Matches(re) => assert!(!re.is_match("ABC")),
            other => panic!("unexpected {}", other),
        }
        let err = parse(json!({"matches": "(unclosed"})).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_unknown_predicate_suggestions() {
        let err = parse(json!(["emtpy"])).unwrap_err();
        assert!(matches!(err, Error::Parse { ref path, .. } if path == "when[0]"));
        assert!(err.suggestions().contains(&"empty".to_string()));

        let err = parse(json!({"not_greter_value": 3})).unwrap_err();
        assert!(err.suggestions().contains(&"greater_value".to_string()));
    }

    #[test]
    fn test_compile_patterns() {
        let mut sources = BTreeMap::new();
        sources.insert("zip".to_string(), r"^\d{5}$".to_string());
        let compiled = compile_patterns(&sources).unwrap();
        assert!(compiled["zip"].is_match("12345"));

        sources.insert("bad".to_string(), "[".to_string());
        assert!(compile_patterns(&sources).is_err());
    }

    #[test]
    fn test_predicate_names_include_patterns() {
        let names = predicate_names();
        assert!(names.contains(&"empty"));
        assert!(names.contains(&"phone_number"));
    }
}
