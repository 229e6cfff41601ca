use serde::{Deserialize, Serialize};

use super::{Collection, Field, Gate};
use crate::conditions::predicates::parse_number;
use crate::conditions::GroupCondition;
use crate::error::{Error, Result};

/// how a group treats checking its members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// plain inputs; no checked semantics beyond each member's own flag
    #[default]
    Inputs,
    /// single selection: checking one member unchecks the others
    Radio,
    /// independent members
    Checkbox,
}

fn default_enabled() -> bool {
    true
}

/// an ordered collection of fields evaluated together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default)]
    pub items: Vec<Field>,
    /// quorum for the next aggregate predicate; 0 means all must pass
    #[serde(default)]
    pub pass_option: usize,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FieldGroup {
    pub fn new(kind: GroupKind, items: Vec<Field>) -> Self {
        Self {
            kind,
            items,
            pass_option: 0,
            enabled: true,
        }
    }

    pub fn inputs(items: Vec<Field>) -> Self {
        Self::new(GroupKind::Inputs, items)
    }

    /// radio group from (value, checked) pairs
    pub fn radios(members: &[(&str, bool)]) -> Self {
        let items = members
            .iter()
            .map(|(value, checked)| Field::radio(*value, *checked))
            .collect();
        Self::new(GroupKind::Radio, items)
    }

    /// checkbox group from (value, checked) pairs
    pub fn checkboxes(members: &[(&str, bool)]) -> Self {
        let items = members
            .iter()
            .map(|(value, checked)| Field::checkbox(*value, *checked))
            .collect();
        Self::new(GroupKind::Checkbox, items)
    }

    /// start an aggregate condition chain on this group
    pub fn when(&mut self) -> GroupCondition<'_, FieldGroup> {
        GroupCondition::new(self)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Field> {
        self.items.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn push(&mut self, field: Field) -> &mut Self {
        if self.enabled {
            self.items.push(field);
        }
        self
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    fn set_member(&mut self, index: usize, checked: bool) {
        if checked && self.kind == GroupKind::Radio {
            for (i, item) in self.items.iter_mut().enumerate() {
                item.checked = i == index;
            }
        } else {
            self.items[index].checked = checked;
        }
    }

    /// (un)check the member at `index`
    pub fn check(&mut self, index: usize, checked: bool) -> Result<&mut Self> {
        if !self.enabled {
            return Ok(self);
        }
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.set_member(index, checked);
        Ok(self)
    }

    /// (un)check members whose value is `value`
    ///
    /// radio groups touch the first match only; other groups touch all
    pub fn check_by_value(&mut self, value: &str, checked: bool) -> &mut Self {
        if !self.enabled {
            return self;
        }
        let matches: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.value.as_deref() == Some(value))
            .map(|(i, _)| i)
            .collect();

        let limit = if self.kind == GroupKind::Radio {
            1
        } else {
            matches.len()
        };
        for index in matches.into_iter().take(limit) {
            self.set_member(index, checked);
        }
        self
    }

    /// (un)check every member; a radio group can only be cleared
    pub fn check_all(&mut self, checked: bool) -> &mut Self {
        if !self.enabled {
            return self;
        }
        if checked && self.kind == GroupKind::Radio {
            tracing::warn!("check_all(true) on a radio group ignored");
            return self;
        }
        for item in &mut self.items {
            item.checked = checked;
        }
        self
    }

    /// value of the first checked member
    pub fn checked_value(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.checked)
            .and_then(|item| item.value.as_deref())
    }

    pub fn checked_values(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .filter_map(|item| item.value.as_deref())
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    /// sum of checked numeric values; non-numeric values are skipped
    pub fn sum_of_checked_values(&self) -> f64 {
        self.checked_values()
            .into_iter()
            .filter_map(parse_number)
            .sum()
    }
}

impl Gate for FieldGroup {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Collection for FieldGroup {
    type Item = Field;

    fn items(&self) -> &[Field] {
        &self.items
    }

    fn pass_option(&self) -> usize {
        self.pass_option
    }

    fn set_pass_option(&mut self, quorum: usize) {
        self.pass_option = quorum;
    }
}
