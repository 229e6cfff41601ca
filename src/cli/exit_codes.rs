//! exit codes for formgate commands
//!
//! these follow Unix conventions where 0 = success and non-zero = error
//! specific codes help scripts distinguish between failure types

/// command completed successfully
pub const SUCCESS: i32 = 0;

/// general or unknown error
pub const ERROR: i32 = 1;

/// `check --fail-disabled` found at least one disabled target
pub const TARGET_DISABLED: i32 = 2;

/// a rule referenced a field or group missing from the form
pub const TARGET_NOT_FOUND: i32 = 3;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 4;

/// rule file or form snapshot error
pub const CONFIG_ERROR: i32 = 5;

/// the condition token stream could not be resolved
pub const CONDITION_ERROR: i32 = 6;

/// a predicate did not fit the target it was applied to
pub const TYPE_MISMATCH: i32 = 7;

/// collection index out of bounds
pub const INDEX_OUT_OF_RANGE: i32 = 8;
