// shared utilities for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::NaiveDate;
use formgate::Clock;

/// a fixed clock: 2024-06-15 12:00
pub fn fixed_clock() -> Clock {
    Clock::Fixed(
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

/// the same instant as `fixed_clock`, formatted for --now
pub const FIXED_NOW: &str = "2024-06-15T12:00";

/// write `content` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// run the formgate binary with text output and no ambient rules file
pub fn run_formgate(args: &[&str]) -> Output {
    run_formgate_with_env(args, &[])
}

/// run the formgate binary with extra environment variables
pub fn run_formgate_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_formgate"));
    cmd.args(args).env_remove("FORMGATE_RULES").env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to run formgate")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// parse the single JSON-RPC line printed by a --json command
pub fn json_output(output: &Output) -> serde_json::Value {
    let text = stdout(output);
    serde_json::from_str(text.trim())
        .unwrap_or_else(|e| panic!("invalid JSON output ({}): {}", e, text))
}
