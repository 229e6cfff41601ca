// library crate for formgate
// exposes the condition engine, targets and rule loading; the binary is a thin CLI over it

pub mod cli;
pub mod conditions;
pub mod config;
pub mod error;
pub mod form;
pub mod target;

pub use conditions::{Action, Check, Clock, Condition, GroupCondition, Token};
pub use error::{Error, Result};
pub use form::{Form, RuleOutcome};
pub use target::{Field, FieldGroup, FieldKind, GroupKind};
