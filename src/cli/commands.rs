use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};

use std::path::PathBuf;

use crate::conditions::{parse_steps, predicate_names, Action, Clock, PatternDefinitions, CATALOG};
use crate::config::{self, CompiledRule};
use crate::error::Error;
use crate::form::Form;
use crate::target::{Field, FieldKind, FileInfo};

use super::exit_codes;
use super::output::{self, CheckData, EvalData, OutputMode, PredicateData, VerifyData};

#[derive(Parser)]
#[command(name = "formgate")]
#[command(about = "Evaluate chained form-field conditions and validation rules")]
#[command(version)]
pub struct Cli {
    /// Path to rules file (overrides FORMGATE_RULES env var and default location)
    #[arg(long, global = true)]
    pub rules: Option<String>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log condition resolution to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply rules to a form snapshot and report each target's enablement
    Check {
        /// Form snapshot (JSON with "fields" and "groups")
        #[arg(short, long)]
        form: PathBuf,

        /// Exit with a non-zero code if any target ends up disabled
        #[arg(long)]
        fail_disabled: bool,

        /// Pin "now" for date/time predicates (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,
    },

    /// Evaluate a step list against a single value
    Eval {
        /// Step list as JSON, e.g. '["not_empty", "and", "email"]'
        steps: String,

        /// Field value (absent means no value)
        #[arg(long)]
        value: Option<String>,

        /// Field kind; number and range compare numerically
        #[arg(long, value_enum, default_value = "text")]
        kind: FieldKind,

        /// Mark the field as checked
        #[arg(long)]
        checked: bool,

        /// Attached file name (repeatable)
        #[arg(long = "file", action = clap::ArgAction::Append)]
        files: Vec<String>,

        /// Enable when the steps do NOT hold
        #[arg(long = "else")]
        otherwise: bool,

        /// Pin "now" for date/time predicates (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        now: Option<String>,
    },

    /// Verify a rules file and report every problem found
    Verify,

    /// List predicate names usable in rule steps
    Predicates {
        /// Output predicate names only, one per line
        #[arg(long)]
        names: bool,
    },
}

pub fn execute(cli: Cli) -> Result<()> {
    let names = matches!(cli.command, Commands::Predicates { names: true });
    let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, names);
    let rules_path = cli.rules.as_deref();

    let result = dispatch(cli.command, output_mode, rules_path);

    if let Err(e) = &result {
        if output_mode.is_json() {
            let code = super::exit_code(e);
            let suggestions = e
                .downcast_ref::<Error>()
                .map(|err| err.suggestions().to_vec())
                .unwrap_or_default();
            output::print_json_error_with_data(code, &format!("{:#}", e), suggestions, Vec::new());
            std::process::exit(code);
        }
    }
    result
}

fn dispatch(command: Commands, output_mode: OutputMode, rules_path: Option<&str>) -> Result<()> {
    match command {
        Commands::Check {
            form,
            fail_disabled,
            now,
        } => {
            let clock = parse_clock(now.as_deref())?;
            let path = config::get_rules_path(rules_path)?;
            let rules = config::load_rules(&path)?;
            let mut snapshot = Form::load(&form)?;

            let outcomes = snapshot.apply_with_clock(&rules, clock)?;
            let disabled = snapshot.disabled_targets();

            match output_mode {
                OutputMode::Json => output::print_json(&CheckData {
                    action: "check",
                    outcomes: &outcomes,
                    disabled: disabled.clone(),
                }),
                OutputMode::Quiet => {}
                OutputMode::Names => {
                    for name in &disabled {
                        println!("{}", name);
                    }
                }
                OutputMode::Text => {
                    for outcome in &outcomes {
                        let mark = if outcome.enabled { "✓" } else { "✗" };
                        if outcome.rule == outcome.target {
                            println!("{} {}", mark, outcome.target);
                        } else {
                            println!("{} {} ({})", mark, outcome.target, outcome.rule);
                        }
                    }
                }
            }

            if fail_disabled && !disabled.is_empty() {
                std::process::exit(exit_codes::TARGET_DISABLED);
            }
            Ok(())
        }

        Commands::Eval {
            steps,
            value,
            kind,
            checked,
            files,
            otherwise,
            now,
        } => {
            let clock = parse_clock(now.as_deref())?;
            let json: serde_json::Value =
                json5::from_str(&steps).map_err(|e| anyhow!("invalid step list: {}", e))?;
            let steps = parse_steps(&json, &PatternDefinitions::new(), "steps")?;

            let mut field = Field::new(kind);
            field.value = value.clone();
            field.checked = checked;
            field.files = files.into_iter().map(FileInfo::new).collect();

            let mut form = Form::default();
            form.fields.insert("value".to_string(), field);

            let rule = CompiledRule {
                label: "eval".to_string(),
                target: "value".to_string(),
                steps,
                action: if otherwise { Action::Else } else { Action::Then },
                quorum: None,
            };
            let outcome = form.apply_rule(&rule, clock)?;

            match output_mode {
                OutputMode::Json => output::print_json(&EvalData {
                    action: "eval",
                    value,
                    kind: kind_name(kind),
                    enabled: outcome.enabled,
                }),
                OutputMode::Quiet => {}
                OutputMode::Text | OutputMode::Names => {
                    println!("{}", if outcome.enabled { "enabled" } else { "disabled" });
                }
            }
            Ok(())
        }

        Commands::Verify => {
            let path = config::get_rules_path(rules_path)?;
            let rules = config::load_rules(&path)?;
            let errors = config::verify_rules(&rules);

            if errors.is_empty() {
                match output_mode {
                    OutputMode::Json => output::print_json(&VerifyData {
                        action: "verify",
                        path: path.display().to_string(),
                        rules: rules.rules.len(),
                        valid: true,
                    }),
                    OutputMode::Quiet => {}
                    _ => println!("✓ Rules are valid: {}", path.display()),
                }
                Ok(())
            } else if output_mode.is_json() {
                output::print_json_error_with_data(
                    exit_codes::CONFIG_ERROR,
                    &format!("rules file has {} error(s)", errors.len()),
                    Vec::new(),
                    errors,
                );
                std::process::exit(exit_codes::CONFIG_ERROR);
            } else {
                println!(
                    "✗ Rules have {} error(s): {}",
                    errors.len(),
                    path.display()
                );
                println!();
                for error in &errors {
                    println!("  - {}", error);
                }
                Err(Error::parse(path.display().to_string(), "rules validation failed").into())
            }
        }

        Commands::Predicates { .. } => {
            match output_mode {
                OutputMode::Json => {
                    let data: Vec<PredicateData> = predicate_catalog()
                        .map(|(name, argument)| PredicateData { name, argument })
                        .collect();
                    output::print_json(&data);
                }
                OutputMode::Names => {
                    for name in predicate_names() {
                        println!("{}", name);
                    }
                }
                OutputMode::Quiet => {}
                OutputMode::Text => {
                    println!("Predicates (prefix with not_ to negate):");
                    for (name, argument) in predicate_catalog() {
                        if argument.is_empty() {
                            println!("  {}", name);
                        } else {
                            println!("  {:<16} {}", name, argument);
                        }
                    }
                    println!();
                    println!("Connectives: and (&&), or (||); and binds tighter");
                }
            }
            Ok(())
        }
    }
}

/// the step catalog followed by built-in pattern names
fn predicate_catalog() -> impl Iterator<Item = (&'static str, &'static str)> {
    let catalog: Vec<&str> = CATALOG.iter().map(|(name, _)| *name).collect();
    CATALOG.iter().copied().chain(
        predicate_names()
            .into_iter()
            .filter(move |name| !catalog.contains(name))
            .map(|name| (name, "")),
    )
}

fn kind_name(kind: FieldKind) -> String {
    kind.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// parse a --now value into a fixed clock; absent means the system clock
fn parse_clock(now: Option<&str>) -> Result<Clock> {
    let Some(now) = now else {
        return Ok(Clock::System);
    };
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(now.trim(), format).ok())
        .map(Clock::Fixed)
        .with_context(|| format!("invalid --now '{}': expected YYYY-MM-DDTHH:MM", now))
}
