use serde::{Deserialize, Serialize};

use super::{Gate, HasChecked, HasFiles, HasOptions, HasValue};
use crate::conditions::time::{self, Clock};
use crate::conditions::{Condition, Filter};

/// input kinds; only decides how values compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Range,
    Email,
    Password,
    Search,
    Hidden,
    Textarea,
    Date,
    Time,
    File,
    Select,
    Radio,
    Checkbox,
    Color,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Range)
    }
}

/// an attached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
        }
    }
}

/// an option of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: None,
            selected,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// a single form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FieldKind::Text)
    }
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            value: None,
            files: Vec::new(),
            options: Vec::new(),
            checked: false,
            enabled: true,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Text).with_value(value)
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Number).with_value(value)
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Date).with_value(value)
    }

    pub fn time(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Time).with_value(value)
    }

    pub fn checkbox(value: impl Into<String>, checked: bool) -> Self {
        let mut field = Self::new(FieldKind::Checkbox).with_value(value);
        field.checked = checked;
        field
    }

    pub fn radio(value: impl Into<String>, checked: bool) -> Self {
        let mut field = Self::new(FieldKind::Radio).with_value(value);
        field.checked = checked;
        field
    }

    pub fn file(names: &[&str]) -> Self {
        let mut field = Self::new(FieldKind::File);
        field.files = names.iter().map(|n| FileInfo::new(*n)).collect();
        field
    }

    pub fn select(options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(FieldKind::Select);
        field.options = options;
        field
    }

    /// start a condition chain on this field
    pub fn when(&mut self) -> Condition<'_, Field> {
        Condition::new(self)
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        if self.enabled {
            self.value = Some(value.into());
        }
        self
    }

    pub fn clear_value(&mut self) -> &mut Self {
        if self.enabled {
            self.value = None;
        }
        self
    }

    pub fn set_checked(&mut self, checked: bool) -> &mut Self {
        if self.enabled {
            self.checked = checked;
        }
        self
    }

    /// mark every option with `value` as (un)selected
    pub fn select_value(&mut self, value: &str, selected: bool) -> &mut Self {
        if self.enabled {
            for option in self.options.iter_mut().filter(|o| o.value == value) {
                option.selected = selected;
            }
        }
        self
    }

    /// strip characters the filter does not allow from the value
    pub fn filter_input(&mut self, filter: Filter) -> &mut Self {
        if self.enabled {
            if let Some(value) = &self.value {
                self.value = Some(filter.apply(value));
            }
        }
        self
    }

    /// replace the value through a date/time transform, leaving it untouched
    /// if the current value does not parse
    fn transform(&mut self, op: &str, f: impl FnOnce(&str) -> Option<String>) -> &mut Self {
        if !self.enabled {
            return self;
        }
        let Some(current) = self.value.clone() else {
            return self;
        };
        match f(&current) {
            Some(next) => self.value = Some(next),
            None => tracing::warn!("{}: cannot shift unparseable value '{}'", op, current),
        }
        self
    }

    pub fn add_days(&mut self, days: i64) -> &mut Self {
        self.transform("add_days", |v| time::add_days(v, days))
    }

    pub fn sub_days(&mut self, days: i64) -> &mut Self {
        self.transform("sub_days", |v| time::add_days(v, days.saturating_neg()))
    }

    pub fn add_months(&mut self, months: i32) -> &mut Self {
        self.transform("add_months", |v| time::add_months(v, months))
    }

    pub fn sub_months(&mut self, months: i32) -> &mut Self {
        self.transform("sub_months", |v| {
            time::add_months(v, months.saturating_neg())
        })
    }

    pub fn add_hours(&mut self, hours: i64) -> &mut Self {
        self.transform("add_hours", |v| time::add_hours(v, hours))
    }

    pub fn sub_hours(&mut self, hours: i64) -> &mut Self {
        self.transform("sub_hours", |v| time::add_hours(v, hours.saturating_neg()))
    }

    pub fn add_minutes(&mut self, minutes: i64) -> &mut Self {
        self.transform("add_minutes", |v| time::add_minutes(v, minutes))
    }

    pub fn sub_minutes(&mut self, minutes: i64) -> &mut Self {
        self.transform("sub_minutes", |v| {
            time::add_minutes(v, minutes.saturating_neg())
        })
    }

    /// set a date value to today's date
    pub fn set_today(&mut self, clock: &Clock) -> &mut Self {
        self.set_value(time::format_date(clock.today()))
    }

    /// set a time value to the current time of day
    pub fn set_now(&mut self, clock: &Clock) -> &mut Self {
        self.set_value(time::format_time(clock.minutes() as u16))
    }

    /// weekday of a date value, 0 = Sunday
    pub fn weekday(&self) -> Option<u32> {
        self.value.as_deref().and_then(time::weekday_of)
    }
}

impl Gate for Field {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl HasValue for Field {
    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }
}

impl HasFiles for Field {
    fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl HasChecked for Field {
    fn is_checked(&self) -> bool {
        self.checked
    }
}

impl HasOptions for Field {
    fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect()
    }
}
