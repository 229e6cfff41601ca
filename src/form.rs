//! form snapshots and rule application

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::conditions::{Clock, Step, Token};
use crate::config::{self, CompiledRule, RuleSet};
use crate::error::{Error, Result};
use crate::target::{Field, FieldGroup};

/// a snapshot of named fields and groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    #[serde(default)]
    pub groups: BTreeMap<String, FieldGroup>,
}

/// enablement of a target after one rule ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: String,
    pub target: String,
    pub enabled: bool,
}

impl Form {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("invalid form snapshot")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse form file: {}", path.display()))
    }

    /// apply every rule in order against the system clock
    pub fn apply(&mut self, rules: &RuleSet) -> Result<Vec<RuleOutcome>> {
        self.apply_with_clock(rules, Clock::System)
    }

    pub fn apply_with_clock(&mut self, rules: &RuleSet, clock: Clock) -> Result<Vec<RuleOutcome>> {
        let compiled = config::compile(rules)?;
        compiled
            .iter()
            .map(|rule| self.apply_rule(rule, clock))
            .collect()
    }

    /// run one rule; fields take precedence over groups of the same name
    pub fn apply_rule(&mut self, rule: &CompiledRule, clock: Clock) -> Result<RuleOutcome> {
        let enabled = if let Some(field) = self.fields.get_mut(&rule.target) {
            apply_to_field(field, rule, clock)?
        } else if let Some(group) = self.groups.get_mut(&rule.target) {
            apply_to_group(group, rule, clock)?
        } else {
            return Err(Error::UnknownTarget(rule.target.clone()));
        };

        tracing::debug!("rule '{}': {} -> enabled={}", rule.label, rule.target, enabled);
        Ok(RuleOutcome {
            rule: rule.label.clone(),
            target: rule.target.clone(),
            enabled,
        })
    }

    /// names of disabled fields and groups
    pub fn disabled_targets(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| !f.enabled)
            .map(|(name, _)| name.as_str())
            .chain(
                self.groups
                    .iter()
                    .filter(|(_, g)| !g.enabled)
                    .map(|(name, _)| name.as_str()),
            )
            .collect()
    }
}

fn apply_to_field(field: &mut Field, rule: &CompiledRule, clock: Clock) -> Result<bool> {
    if rule.quorum.is_some() {
        return Err(Error::type_mismatch(format!(
            "rule '{}': quorum applies to groups, '{}' is a field",
            rule.label, rule.target
        )));
    }

    let mut cond = field.when().with_clock(clock);
    for step in &rule.steps {
        cond = match step {
            Step::Check(check) => cond.check(check)?,
            Step::Connective(Token::And) => cond.and(),
            Step::Connective(Token::Or) => cond.or(),
            Step::Connective(token) => cond.token(*token),
        };
    }
    Ok(cond.resolve(rule.action)?.enabled)
}

/// the rule's quorum is re-applied before each predicate step
fn apply_to_group(group: &mut FieldGroup, rule: &CompiledRule, clock: Clock) -> Result<bool> {
    let mut cond = group.when().with_clock(clock);
    for step in &rule.steps {
        cond = match step {
            Step::Check(check) => cond.set_pass_option(rule.quorum.unwrap_or(0)).each(check)?,
            Step::Connective(Token::And) => cond.and(),
            Step::Connective(Token::Or) => cond.or(),
            Step::Connective(token) => cond.token(*token),
        };
    }
    Ok(cond.resolve(rule.action)?.enabled)
}
