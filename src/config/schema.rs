use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// a rule file: named patterns plus an ordered list of rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// regexes usable from steps as {"pattern": name}
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub patterns: BTreeMap<String, String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// one condition chain applied to a field or group of a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// field or group name in the form snapshot
    pub target: String,
    /// step list: predicates and connectives
    pub when: serde_json::Value,
    /// "then" (default) or "else"/"otherwise"
    #[serde(default = "default_action")]
    pub action: String,
    /// pass quorum for group targets; absent means all members must pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum: Option<usize>,
}

fn default_action() -> String {
    "then".to_string()
}

impl Rule {
    /// display label: the rule name, or its target
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.target)
    }
}
