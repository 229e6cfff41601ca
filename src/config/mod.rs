mod schema;

pub use schema::{Rule, RuleSet};

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::conditions::{
    compile_patterns, compile_regex, parse_steps, Action, PatternDefinitions, Step,
};
use crate::error::Error;

const RULES_ENV_VAR: &str = "FORMGATE_RULES";

/// resolve the rule file: explicit path, then $FORMGATE_RULES, then
/// ~/.formgate/rules.json5
pub fn get_rules_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(shellexpand::tilde(path.trim()).to_string()));
    }

    if let Ok(path) = env::var(RULES_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(path.trim()).to_string()));
        }
    }

    Ok(dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .join(".formgate")
        .join("rules.json5"))
}

/// parse rule file content (JSON5, so plain JSON works too)
pub fn parse_rules(content: &str) -> Result<RuleSet> {
    json5::from_str(content).map_err(|e| anyhow!("invalid JSON5: {}", e))
}

pub fn load_rules(path: &Path) -> Result<RuleSet> {
    if !path.exists() {
        return Err(anyhow!("rules file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file: {}", path.display()))?;

    parse_rules(&content)
        .with_context(|| format!("Failed to parse rules file: {}", path.display()))
}

/// a rule with its steps parsed and patterns resolved
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub label: String,
    pub target: String,
    pub steps: Vec<Step>,
    pub action: Action,
    pub quorum: Option<usize>,
}

/// parse every rule of a set, stopping at the first error
pub fn compile(rules: &RuleSet) -> Result<Vec<CompiledRule>, Error> {
    let patterns = compile_patterns(&rules.patterns)?;

    rules
        .rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            let prefix = format!("rules[{}]", i);
            let action = parse_action(&rule.action)
                .map_err(|message| Error::parse(format!("{}.action", prefix), message))?;
            let steps = parse_steps(&rule.when, &patterns, &format!("{}.when", prefix))?;
            Ok(CompiledRule {
                label: rule.label().to_string(),
                target: rule.target.clone(),
                steps,
                action,
                quorum: rule.quorum,
            })
        })
        .collect()
}

fn parse_action(action: &str) -> Result<Action, String> {
    Action::parse(action).ok_or_else(|| {
        format!(
            "invalid action '{}': valid actions are then, else, otherwise",
            action
        )
    })
}

/// Verify a rule file and return a list of errors
pub fn verify(path: &Path) -> Result<Vec<String>> {
    let rules = load_rules(path)?;
    Ok(verify_rules(&rules))
}

pub fn verify_rules(rules: &RuleSet) -> Vec<String> {
    let mut errors = Vec::new();

    // compile patterns one by one so every bad regex is reported
    let mut patterns = PatternDefinitions::new();
    for (name, source) in &rules.patterns {
        match compile_regex(source) {
            Ok(regex) => {
                patterns.insert(name.clone(), regex);
            }
            Err(e) => errors.push(format!("patterns.{}: {}", name, e)),
        }
    }

    for (i, rule) in rules.rules.iter().enumerate() {
        let prefix = format!("rules[{}]", i);

        if rule.target.trim().is_empty() {
            errors.push(format!("{}: 'target' must not be empty", prefix));
        }

        if let Err(e) = parse_action(&rule.action) {
            errors.push(format!("{}.action: {}", prefix, e));
        }

        match parse_steps(&rule.when, &patterns, &format!("{}.when", prefix)) {
            Ok(steps) => {
                if let Some(problem) = lint_steps(&steps) {
                    errors.push(format!("{}.when: {}", prefix, problem));
                }
            }
            Err(e) => errors.push(with_suggestions(&e)),
        }
    }

    errors
}

/// flag step lists whose connectives have nothing to connect
fn lint_steps(steps: &[Step]) -> Option<String> {
    let is_connective = |step: &Step| matches!(step, Step::Connective(_));

    if steps.first().is_some_and(is_connective) {
        return Some("starts with a connective".to_string());
    }
    if steps.last().is_some_and(is_connective) {
        return Some("ends with a connective".to_string());
    }
    if steps
        .windows(2)
        .any(|pair| is_connective(&pair[0]) && is_connective(&pair[1]))
    {
        return Some("adjacent connectives".to_string());
    }
    None
}

fn with_suggestions(err: &Error) -> String {
    let suggestions = err.suggestions();
    if suggestions.is_empty() {
        err.to_string()
    } else {
        format!("{} (did you mean: {}?)", err, suggestions.join(", "))
    }
}
