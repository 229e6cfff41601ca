//! condition chains for form fields
//!
//! provides a fluent condition system supporting:
//! - value predicates: emptiness, equality, ranges, lengths, character classes
//! - capability predicates: files, selected options, checked state
//! - date/time deltas against a pinnable clock
//! - connectives: and (binds tighter), or
//! - aggregate evaluation over field groups with a pass quorum
//!
//! chains start with `when()` on a target and end with `then()` or
//! `otherwise()`, which write the resolved value to the target's enablement flag.

/// generate a predicate method and its negation for every value check
///
/// each builder supplies `test_value`, which runs the closure against one
/// value (single target) or every member value (group)
macro_rules! value_checks {
    ($(
        $(#[$doc:meta])*
        $name:ident / $negated:ident ( $($arg:ident : $ty:ty),* ) => |$v:ident, $numeric:ident, $clock:ident| $body:expr;
    )*) => {
        $(
            $(#[$doc])*
            #[allow(unused_variables)]
            pub fn $name(self, $($arg: $ty),*) -> Self {
                self.test_value(|$v, $numeric, $clock| $body)
            }

            #[doc = concat!("Negation of [`Self::", stringify!($name), "`].")]
            #[allow(unused_variables)]
            pub fn $negated(self, $($arg: $ty),*) -> Self {
                self.test_value(|$v, $numeric, $clock| !($body))
            }
        )*
    };
}

/// the value predicate catalog shared by both builders
macro_rules! impl_value_checks {
    () => {
        value_checks! {
            /// value is absent or blank after trimming
            is_empty / is_not_empty () => |v, numeric, clock| $crate::conditions::predicates::is_empty(v);
            /// value equals `expected` exactly
            is_equal / is_not_equal (expected: &str) => |v, numeric, clock| $crate::conditions::predicates::is_equal(v, expected);
            /// value contains `needle` (case-sensitive)
            includes / not_includes (needle: &str) => |v, numeric, clock| $crate::conditions::predicates::includes(v, needle);
            /// value > bound (numeric for number/range fields, lexicographic otherwise)
            is_greater_value / is_not_greater_value (bound: &str) => |v, numeric, clock| $crate::conditions::predicates::is_greater_value(v, bound, numeric);
            /// value < bound
            is_less_value / is_not_less_value (bound: &str) => |v, numeric, clock| $crate::conditions::predicates::is_less_value(v, bound, numeric);
            /// start <= value <= end
            is_value_between / is_not_value_between (start: &str, end: &str) => |v, numeric, clock| $crate::conditions::predicates::is_value_between(v, start, end, numeric);
            is_greater_length / is_not_greater_length (n: usize) => |v, numeric, clock| $crate::conditions::predicates::is_greater_length(v, n);
            is_less_length / is_not_less_length (n: usize) => |v, numeric, clock| $crate::conditions::predicates::is_less_length(v, n);
            /// start <= character count <= end
            is_length_between / is_not_length_between (start: usize, end: usize) => |v, numeric, clock| $crate::conditions::predicates::is_length_between(v, start, end);
            /// value parses as a finite number
            is_number / is_not_number () => |v, numeric, clock| $crate::conditions::predicates::is_number(v);
            is_only_english / is_not_only_english () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::English);
            is_lowercase / is_not_lowercase () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Lowercase);
            is_uppercase / is_not_uppercase () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Uppercase);
            is_only_korean / is_not_only_korean () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Korean);
            is_only_japanese / is_not_only_japanese () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Japanese);
            is_only_hiragana / is_not_only_hiragana () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Hiragana);
            is_only_katakana / is_not_only_katakana () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Katakana);
            is_only_kanji / is_not_only_kanji () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Kanji);
            is_only_chinese / is_not_only_chinese () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Chinese);
            includes_space / not_includes_space () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Space);
            includes_special_char / not_includes_special_char () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::SpecialChar);
            is_id / is_not_id () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Id);
            is_password / is_not_password () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Password);
            is_strong_password / is_not_strong_password () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::StrongPassword);
            is_email / is_not_email () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Email);
            is_url / is_not_url () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::Url);
            is_phone_number / is_not_phone_number () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::PhoneNumber);
            is_postal_code / is_not_postal_code () => |v, numeric, clock| $crate::conditions::predicates::matches_pattern(v, $crate::conditions::Pattern::PostalCode);
            /// value matches a caller-supplied regex
            matches / not_matches (regex: &::regex::Regex) => |v, numeric, clock| $crate::conditions::predicates::matches_regex(v, regex);
            /// date value is on or before today minus `months`
            is_months_ago / is_not_months_ago (months: i32) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_months_ago(v, months, clock));
            /// date value is on or after today plus `months`
            is_months_later / is_not_months_later (months: i32) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_months_later(v, months, clock));
            /// date value is on or before today minus `days`
            is_days_ago / is_not_days_ago (days: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_days_ago(v, days, clock));
            /// date value is on or after today plus `days`
            is_days_later / is_not_days_later (days: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_days_later(v, days, clock));
            /// date value is on or before `reference`
            is_date_ago / is_not_date_ago (reference: &str) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_date_ago(v, reference));
            /// date value is on or after `reference`
            is_date_later / is_not_date_later (reference: &str) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_date_later(v, reference));
            /// time value is at or before now minus `hours`
            is_hours_ago / is_not_hours_ago (hours: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_hours_ago(v, hours, clock));
            /// time value is at or after now plus `hours`
            is_hours_later / is_not_hours_later (hours: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_hours_later(v, hours, clock));
            is_minutes_ago / is_not_minutes_ago (minutes: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_minutes_ago(v, minutes, clock));
            is_minutes_later / is_not_minutes_later (minutes: i64) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_minutes_later(v, minutes, clock));
            /// time value is at or before `reference`
            is_time_ago / is_not_time_ago (reference: &str) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_time_ago(v, reference));
            /// time value is at or after `reference`
            is_time_later / is_not_time_later (reference: &str) => |v, numeric, clock| v.is_some_and(|v| $crate::conditions::time::is_time_later(v, reference));
        }
    };
}

mod aggregate;
mod builder;
mod check;
mod expr;
mod parser;
mod patterns;
pub mod predicates;
pub mod time;
mod types;

pub use aggregate::GroupCondition;
pub use builder::Condition;
pub use check::{Check, CATALOG};
pub use expr::{ConditionState, Expression};
pub use parser::{
    compile_patterns, compile_regex, parse_check, parse_steps, predicate_names, PatternDefinitions,
    Step,
};
pub use patterns::{Filter, Pattern, PASSWORD_SPECIALS};
pub use time::Clock;
pub use types::{Action, Token};
