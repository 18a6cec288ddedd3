//! Declarative filter/form field metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::FilterValue;

/// The kind of a filterable field. Determines the shape of the associated
/// filter value and how it is matched against record attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Case-insensitive substring match.
    Text,
    /// Exact match against one of a fixed set of options.
    Select,
    /// Same-calendar-day match.
    Date,
    /// Inclusive [start, end] calendar-day range.
    DateRange,
    /// Exact numeric equality.
    Number,
    /// Exact boolean equality.
    Boolean,
}

impl FieldKind {
    /// Canonical name as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
            FieldKind::DateRange => "dateRange",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(FieldKind::Text),
            "select" => Ok(FieldKind::Select),
            "date" => Ok(FieldKind::Date),
            "dateRange" | "date_range" => Ok(FieldKind::DateRange),
            "number" => Ok(FieldKind::Number),
            "boolean" => Ok(FieldKind::Boolean),
            _ => Err(format!("Unknown field kind: {}", s)),
        }
    }
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value compared against record attributes.
    pub value: String,
    /// Display text.
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Declarative description of one filterable attribute.
///
/// A list of these drives a `FilterEngine`: the `key` names the record
/// attribute, the `kind` picks the matching rule, and `default` (when set)
/// overrides the kind-specific empty value at initialization and reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    /// Choices for `kind == Select`; empty for every other kind.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Initial value, used instead of the kind-specific empty value.
    #[serde(default)]
    pub default: Option<FilterValue>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            default: None,
        }
    }

    /// Shorthand for a free-text field.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    /// Shorthand for a select field with its options.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(key, label, FieldKind::Select)
        }
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn date_range(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::DateRange)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Boolean)
    }

    /// Set the initial value used at engine construction and reset.
    #[must_use]
    pub fn with_default(mut self, value: FilterValue) -> Self {
        self.default = Some(value);
        self
    }

    /// The value this field starts from: the declared default, or the
    /// kind-specific empty value.
    pub fn initial_value(&self) -> FilterValue {
        self.default
            .clone()
            .unwrap_or_else(|| FilterValue::empty_for(self.kind))
    }
}
