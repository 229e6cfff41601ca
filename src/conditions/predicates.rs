//! the predicate library: pure tests over one field's current value
//!
//! an absent value (`None`) is empty and fails every other value test

use std::cmp::Ordering;

use regex::Regex;

use super::patterns::Pattern;

/// parse a trimmed value as a finite number; empty and non-numeric text fail
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_empty(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

pub fn is_equal(value: Option<&str>, expected: &str) -> bool {
    value == Some(expected)
}

pub fn includes(value: Option<&str>, needle: &str) -> bool {
    value.map(|v| v.contains(needle)).unwrap_or(false)
}

pub fn is_number(value: Option<&str>) -> bool {
    value.and_then(parse_number).is_some()
}

/// order `value` against `bound`
///
/// numeric fields compare numerically and yield `None` if either side is
/// not a number; text fields compare lexicographically
fn compare_value(value: &str, bound: &str, numeric: bool) -> Option<Ordering> {
    if numeric {
        let a = parse_number(value)?;
        let b = parse_number(bound)?;
        a.partial_cmp(&b)
    } else {
        Some(value.cmp(bound))
    }
}

pub fn is_greater_value(value: Option<&str>, bound: &str, numeric: bool) -> bool {
    value
        .and_then(|v| compare_value(v, bound, numeric))
        .map(|o| o == Ordering::Greater)
        .unwrap_or(false)
}

pub fn is_less_value(value: Option<&str>, bound: &str, numeric: bool) -> bool {
    value
        .and_then(|v| compare_value(v, bound, numeric))
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

/// start <= value <= end
pub fn is_value_between(value: Option<&str>, start: &str, end: &str, numeric: bool) -> bool {
    let Some(v) = value else {
        return false;
    };
    let lower = compare_value(v, start, numeric);
    let upper = compare_value(v, end, numeric);
    matches!(lower, Some(Ordering::Greater | Ordering::Equal))
        && matches!(upper, Some(Ordering::Less | Ordering::Equal))
}

fn char_len(value: Option<&str>) -> Option<usize> {
    value.map(|v| v.chars().count())
}

pub fn is_greater_length(value: Option<&str>, n: usize) -> bool {
    char_len(value).map(|len| len > n).unwrap_or(false)
}

pub fn is_less_length(value: Option<&str>, n: usize) -> bool {
    char_len(value).map(|len| len < n).unwrap_or(false)
}

pub fn is_length_between(value: Option<&str>, start: usize, end: usize) -> bool {
    char_len(value)
        .map(|len| len >= start && len <= end)
        .unwrap_or(false)
}

pub fn matches_pattern(value: Option<&str>, pattern: Pattern) -> bool {
    value.map(|v| pattern.matches(v)).unwrap_or(false)
}

pub fn matches_regex(value: Option<&str>, regex: &Regex) -> bool {
    value.map(|v| regex.is_match(v)).unwrap_or(false)
}

pub fn is_greater_count(count: usize, n: usize) -> bool {
    count > n
}

pub fn is_less_count(count: usize, n: usize) -> bool {
    count < n
}

pub fn is_count_between(count: usize, start: usize, end: usize) -> bool {
    count >= start && count <= end
}
