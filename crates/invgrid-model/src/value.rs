//! Kind-shaped filter values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::FieldKind;

/// Current value of one filter field.
///
/// The variant carries the shape the field kind calls for: a single scalar,
/// or a two-ended calendar-day range. `Text` doubles as the value shape for
/// `select` fields, which store the chosen option's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FilterValue {
    Text(String),
    Number(Option<f64>),
    Flag(bool),
    Date(Option<NaiveDate>),
    DateRange(Option<NaiveDate>, Option<NaiveDate>),
}

impl FilterValue {
    /// The kind-specific empty value a field is seeded with when it has no
    /// declared default: empty string for text/select, `None` for
    /// number/date, `false` for boolean, two `None`s for a date range.
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Select => FilterValue::Text(String::new()),
            FieldKind::Number => FilterValue::Number(None),
            FieldKind::Boolean => FilterValue::Flag(false),
            FieldKind::Date => FilterValue::Date(None),
            FieldKind::DateRange => FilterValue::DateRange(None, None),
        }
    }

    /// Whether this value is skipped entirely when filtering a collection.
    ///
    /// Empty means: empty string, absent number/date, or a range with both
    /// ends absent. A `Flag` is never empty — a boolean filter set to
    /// `false` still matches records whose attribute is `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(value) => value.is_empty(),
            FilterValue::Number(value) => value.is_none(),
            FilterValue::Flag(_) => false,
            FilterValue::Date(value) => value.is_none(),
            FilterValue::DateRange(start, end) => start.is_none() && end.is_none(),
        }
    }

    /// Whether this value counts toward the active-filter badge.
    ///
    /// Stricter than `is_empty`: a boolean counts only when `true`, and a
    /// date range counts only when both ends are set.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(value) => !value.is_empty(),
            FilterValue::Number(value) => value.is_some(),
            FilterValue::Flag(value) => *value,
            FilterValue::Date(value) => value.is_some(),
            FilterValue::DateRange(start, end) => start.is_some() && end.is_some(),
        }
    }

    /// Whether this value's shape matches the given field kind.
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FilterValue::Text(_), FieldKind::Text | FieldKind::Select)
                | (FilterValue::Number(_), FieldKind::Number)
                | (FilterValue::Flag(_), FieldKind::Boolean)
                | (FilterValue::Date(_), FieldKind::Date)
                | (FilterValue::DateRange(_, _), FieldKind::DateRange)
        )
    }

    /// Convenience constructor for a populated text/select value.
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// Convenience constructor for a populated number value.
    pub fn number(value: f64) -> Self {
        FilterValue::Number(Some(value))
    }

    /// Convenience constructor for a populated date value.
    pub fn date(value: NaiveDate) -> Self {
        FilterValue::Date(Some(value))
    }

    /// Convenience constructor for a fully-bounded date range.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        FilterValue::DateRange(Some(start), Some(end))
    }
}
