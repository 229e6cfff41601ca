//! dynamically described predicates
//!
//! a `Check` names one predicate with its arguments so rules loaded from a
//! file can drive the same catalog the builders expose as methods.

use regex::Regex;

use super::patterns::Pattern;
use super::predicates;
use super::time::{self, Clock};
use crate::error::{Error, Result};
use crate::target::{HasChecked, HasFiles, HasOptions, HasValue};

/// predicate names accepted in rule steps, with their argument shape
///
/// built-in pattern names (see [`Pattern::ALL`]) are accepted as bare names too
pub const CATALOG: &[(&str, &str)] = &[
    ("empty", ""),
    ("equal", "text"),
    ("includes", "text"),
    ("greater_value", "text|number"),
    ("less_value", "text|number"),
    ("value_between", "[start, end]"),
    ("greater_length", "count"),
    ("less_length", "count"),
    ("length_between", "[start, end]"),
    ("number", ""),
    ("pattern", "name"),
    ("matches", "regex"),
    ("greater_files", "count"),
    ("less_files", "count"),
    ("files_between", "[start, end]"),
    ("selected", ""),
    ("selected_value", "text"),
    ("checked", ""),
    ("any_checked", ""),
    ("checked_value", "text"),
    ("months_ago", "months"),
    ("months_later", "months"),
    ("days_ago", "days"),
    ("days_later", "days"),
    ("date_ago", "YYYY-MM-DD"),
    ("date_later", "YYYY-MM-DD"),
    ("hours_ago", "hours"),
    ("hours_later", "hours"),
    ("minutes_ago", "minutes"),
    ("minutes_later", "minutes"),
    ("time_ago", "HH:MM"),
    ("time_later", "HH:MM"),
];

/// one predicate with its arguments
#[derive(Debug, Clone)]
pub enum Check {
    Empty,
    Equal(String),
    Includes(String),
    GreaterValue(String),
    LessValue(String),
    ValueBetween(String, String),
    GreaterLength(usize),
    LessLength(usize),
    LengthBetween(usize, usize),
    Number,
    Pattern(Pattern),
    Matches(Regex),
    GreaterFiles(usize),
    LessFiles(usize),
    FilesBetween(usize, usize),
    Selected,
    SelectedValue(String),
    Checked,
    /// any member of a group is checked
    AnyChecked,
    /// a member of a group with this value is checked
    CheckedValue(String),
    MonthsAgo(i32),
    MonthsLater(i32),
    DaysAgo(i64),
    DaysLater(i64),
    DateAgo(String),
    DateLater(String),
    HoursAgo(i64),
    HoursLater(i64),
    MinutesAgo(i64),
    MinutesLater(i64),
    TimeAgo(String),
    TimeLater(String),
    Not(Box<Check>),
}

impl Check {
    /// name as written in rule steps
    pub fn name(&self) -> &'static str {
        match self {
            Check::Empty => "empty",
            Check::Equal(_) => "equal",
            Check::Includes(_) => "includes",
            Check::GreaterValue(_) => "greater_value",
            Check::LessValue(_) => "less_value",
            Check::ValueBetween(..) => "value_between",
            Check::GreaterLength(_) => "greater_length",
            Check::LessLength(_) => "less_length",
            Check::LengthBetween(..) => "length_between",
            Check::Number => "number",
            Check::Pattern(p) => p.name(),
            Check::Matches(_) => "matches",
            Check::GreaterFiles(_) => "greater_files",
            Check::LessFiles(_) => "less_files",
            Check::FilesBetween(..) => "files_between",
            Check::Selected => "selected",
            Check::SelectedValue(_) => "selected_value",
            Check::Checked => "checked",
            Check::AnyChecked => "any_checked",
            Check::CheckedValue(_) => "checked_value",
            Check::MonthsAgo(_) => "months_ago",
            Check::MonthsLater(_) => "months_later",
            Check::DaysAgo(_) => "days_ago",
            Check::DaysLater(_) => "days_later",
            Check::DateAgo(_) => "date_ago",
            Check::DateLater(_) => "date_later",
            Check::HoursAgo(_) => "hours_ago",
            Check::HoursLater(_) => "hours_later",
            Check::MinutesAgo(_) => "minutes_ago",
            Check::MinutesLater(_) => "minutes_later",
            Check::TimeAgo(_) => "time_ago",
            Check::TimeLater(_) => "time_later",
            Check::Not(_) => "not",
        }
    }

    /// whether the check only makes sense against a whole group
    pub fn is_group_level(&self) -> bool {
        match self {
            Check::AnyChecked | Check::CheckedValue(_) => true,
            Check::Not(inner) => inner.is_group_level(),
            _ => false,
        }
    }

    /// evaluate against a single target
    pub fn evaluate<T>(&self, target: &T, clock: &Clock) -> Result<bool>
    where
        T: HasValue + HasFiles + HasChecked + HasOptions,
    {
        let value = target.value();
        let numeric = target.is_numeric();

        let passed = match self {
            Check::Empty => predicates::is_empty(value),
            Check::Equal(expected) => predicates::is_equal(value, expected),
            Check::Includes(needle) => predicates::includes(value, needle),
            Check::GreaterValue(bound) => predicates::is_greater_value(value, bound, numeric),
            Check::LessValue(bound) => predicates::is_less_value(value, bound, numeric),
            Check::ValueBetween(start, end) => {
                predicates::is_value_between(value, start, end, numeric)
            }
            Check::GreaterLength(n) => predicates::is_greater_length(value, *n),
            Check::LessLength(n) => predicates::is_less_length(value, *n),
            Check::LengthBetween(start, end) => predicates::is_length_between(value, *start, *end),
            Check::Number => predicates::is_number(value),
            Check::Pattern(pattern) => predicates::matches_pattern(value, *pattern),
            Check::Matches(regex) => predicates::matches_regex(value, regex),
            Check::GreaterFiles(n) => predicates::is_greater_count(target.file_count(), *n),
            Check::LessFiles(n) => predicates::is_less_count(target.file_count(), *n),
            Check::FilesBetween(start, end) => {
                predicates::is_count_between(target.file_count(), *start, *end)
            }
            Check::Selected => !target.selected_values().is_empty(),
            Check::SelectedValue(expected) => target.selected_values().contains(&expected.as_str()),
            Check::Checked => target.is_checked(),
            Check::AnyChecked | Check::CheckedValue(_) => {
                return Err(Error::type_mismatch(format!(
                    "'{}' applies to groups, not single fields",
                    self.name()
                )))
            }
            Check::MonthsAgo(n) => value.is_some_and(|v| time::is_months_ago(v, *n, clock)),
            Check::MonthsLater(n) => value.is_some_and(|v| time::is_months_later(v, *n, clock)),
            Check::DaysAgo(n) => value.is_some_and(|v| time::is_days_ago(v, *n, clock)),
            Check::DaysLater(n) => value.is_some_and(|v| time::is_days_later(v, *n, clock)),
            Check::DateAgo(reference) => value.is_some_and(|v| time::is_date_ago(v, reference)),
            Check::DateLater(reference) => {
                value.is_some_and(|v| time::is_date_later(v, reference))
            }
            Check::HoursAgo(n) => value.is_some_and(|v| time::is_hours_ago(v, *n, clock)),
            Check::HoursLater(n) => value.is_some_and(|v| time::is_hours_later(v, *n, clock)),
            Check::MinutesAgo(n) => value.is_some_and(|v| time::is_minutes_ago(v, *n, clock)),
            Check::MinutesLater(n) => {
                value.is_some_and(|v| time::is_minutes_later(v, *n, clock))
            }
            Check::TimeAgo(reference) => value.is_some_and(|v| time::is_time_ago(v, reference)),
            Check::TimeLater(reference) => {
                value.is_some_and(|v| time::is_time_later(v, reference))
            }
            Check::Not(inner) => !inner.evaluate(target, clock)?,
        };
        Ok(passed)
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Not(inner) => write!(f, "not_{}", inner),
            Check::Matches(regex) => write!(f, "matches({})", regex.as_str()),
            Check::Equal(s)
            | Check::Includes(s)
            | Check::GreaterValue(s)
            | Check::LessValue(s)
            | Check::SelectedValue(s)
            | Check::CheckedValue(s)
            | Check::DateAgo(s)
            | Check::DateLater(s)
            | Check::TimeAgo(s)
            | Check::TimeLater(s) => write!(f, "{}({})", self.name(), s),
            Check::ValueBetween(a, b) => write!(f, "{}({}, {})", self.name(), a, b),
            Check::GreaterLength(n)
            | Check::LessLength(n)
            | Check::GreaterFiles(n)
            | Check::LessFiles(n) => write!(f, "{}({})", self.name(), n),
            Check::LengthBetween(a, b) | Check::FilesBetween(a, b) => {
                write!(f, "{}({}, {})", self.name(), a, b)
            }
            Check::MonthsAgo(n) | Check::MonthsLater(n) => write!(f, "{}({})", self.name(), n),
            Check::DaysAgo(n)
            | Check::DaysLater(n)
            | Check::HoursAgo(n)
            | Check::HoursLater(n)
            | Check::MinutesAgo(n)
            | Check::MinutesLater(n) => write!(f, "{}({})", self.name(), n),
            _ => write!(f, "{}", self.name()),
        }
    }
}
