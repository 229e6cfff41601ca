//! output formatting utilities for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "...", "data": {...}}, "id": null}

use serde::Serialize;
use std::io::IsTerminal;

use crate::form::RuleOutcome;

/// JSON-RPC version constant
const JSONRPC_VERSION: &str = "2.0";

/// output mode determines how results are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no output on success (errors still go to stderr)
    Quiet,
    /// one item name per line, ideal for piping to fzf/xargs
    Names,
}

impl OutputMode {
    /// determine output mode from CLI flags and environment
    ///
    /// priority: quiet > names > json > no_json > auto-detect
    pub fn from_flags(json: bool, no_json: bool, quiet: bool, names: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if names {
            return Self::Names;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        // auto-detect: JSON when stdout is not a TTY (piped)
        if !std::io::stdout().is_terminal() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// JSON-RPC 2.0 success response
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// null for CLI responses (no request id)
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

/// JSON-RPC 2.0 error object
#[derive(Serialize)]
pub struct RpcError {
    /// exit code offset by -32000 for application errors
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// additional error data
#[derive(Serialize)]
pub struct ErrorData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl JsonRpcError {
    /// empty suggestion and detail lists leave `data` out entirely
    pub fn with_data(
        code: i32,
        message: impl Into<String>,
        suggestions: Vec<String>,
        details: Vec<String>,
    ) -> Self {
        let non_empty = |v: Vec<String>| if v.is_empty() { None } else { Some(v) };
        let suggestions = non_empty(suggestions);
        let details = non_empty(details);
        let data = (suggestions.is_some() || details.is_some()).then_some(ErrorData {
            suggestions,
            details,
        });

        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data,
            },
            id: None,
        }
    }
}

/// convert formgate exit code to JSON-RPC error code
/// JSON-RPC reserves -32000 to -32099 for server/application errors
fn to_jsonrpc_code(code: i32) -> i32 {
    -32000 - code
}

// ============================================================================
// Result data structures for different commands
// ============================================================================

/// result data for the check command
#[derive(Serialize)]
pub struct CheckData<'a> {
    pub action: &'static str,
    pub outcomes: &'a [RuleOutcome],
    pub disabled: Vec<&'a str>,
}

/// result data for the eval command
#[derive(Serialize)]
pub struct EvalData {
    pub action: &'static str,
    pub value: Option<String>,
    pub kind: String,
    pub enabled: bool,
}

/// result data for the verify command
#[derive(Serialize)]
pub struct VerifyData {
    pub action: &'static str,
    pub path: String,
    pub rules: usize,
    pub valid: bool,
}

/// one entry of the predicate catalog
#[derive(Serialize)]
pub struct PredicateData {
    pub name: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub argument: &'static str,
}

/// print JSON-RPC success response to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print JSON-RPC error with suggestions and detail lines
pub fn print_json_error_with_data(
    code: i32,
    message: &str,
    suggestions: Vec<String>,
    details: Vec<String>,
) {
    let error = JsonRpcError::with_data(code, message, suggestions, details);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
