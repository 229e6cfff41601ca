//! error types shared by the condition engine, targets and rule loading

use crate::cli::exit_codes;

/// errors raised while building or resolving conditions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// a predicate was used where an element-level callable was required
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// the accumulated token stream could not be resolved
    #[error("condition evaluation failed: {0}")]
    ConditionEvaluation(String),

    /// an index into a collection exceeded its bounds
    #[error("index {index} out of range for collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// a custom or named regex failed to compile
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// a rule referenced a field or group missing from the form
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// a rule step could not be parsed
    #[error("{path}: {message}")]
    Parse {
        path: String,
        message: String,
        suggestions: Vec<String>,
    },
}

impl Error {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Error::TypeMismatch(message.into())
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Error::ConditionEvaluation(message.into())
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn parse_with_suggestions(
        path: impl Into<String>,
        message: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
            suggestions,
        }
    }

    /// suggested alternatives, if any (e.g., similar predicate names)
    pub fn suggestions(&self) -> &[String] {
        match self {
            Error::Parse { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TypeMismatch(_) => exit_codes::TYPE_MISMATCH,
            Error::ConditionEvaluation(_) => exit_codes::CONDITION_ERROR,
            Error::IndexOutOfRange { .. } => exit_codes::INDEX_OUT_OF_RANGE,
            Error::InvalidPattern { .. } | Error::Parse { .. } => exit_codes::CONFIG_ERROR,
            Error::UnknownTarget(_) => exit_codes::TARGET_NOT_FOUND,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
