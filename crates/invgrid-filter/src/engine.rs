//! The filter engine: typed field values, free-text search, debounced
//! change notification, and pure in-memory filtering.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use invgrid_model::{FieldKind, FieldSpec, FilterValue};

use crate::debounce::Debounce;
use crate::error::{FilterError, Result};
use crate::record::{Attr, Record};

/// Default quiet window before a change notification fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Payload handed to the change callback: every filter value plus the
/// free-text query, reflecting the state after the last mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSnapshot {
    pub filters: BTreeMap<String, FilterValue>,
    pub search_query: String,
}

type ChangeCallback = Box<dyn FnMut(&FilterSnapshot)>;

/// Maintains the filter value map and search query for one list view.
///
/// Construction seeds every field from its default or kind-specific empty
/// value. Mutations arm a debounce deadline; the owner polls [`tick`] and
/// the registered callback fires once per quiet period. [`reset_filters`]
/// is the one mutation that notifies immediately.
///
/// [`tick`]: FilterEngine::tick
/// [`reset_filters`]: FilterEngine::reset_filters
pub struct FilterEngine {
    fields: Vec<FieldSpec>,
    values: BTreeMap<String, FilterValue>,
    search_query: String,
    debounce: Debounce,
    on_change: Option<ChangeCallback>,
}

impl FilterEngine {
    /// Build an engine over the given field specs.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::DuplicateField` when two specs share a key.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut values = BTreeMap::new();
        for field in &fields {
            if values
                .insert(field.key.clone(), field.initial_value())
                .is_some()
            {
                return Err(FilterError::DuplicateField(field.key.clone()));
            }
        }
        Ok(Self {
            fields,
            values,
            search_query: String::new(),
            debounce: Debounce::new(DEFAULT_DEBOUNCE),
            on_change: None,
        })
    }

    /// Register the debounced change callback.
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(&FilterSnapshot) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Override the debounce quiet window.
    #[must_use]
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = Debounce::new(window);
        self
    }

    /// Field specs, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Current filter values.
    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.values
    }

    /// Current value for one field.
    pub fn filter_value(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Current free-text query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether a change notification is pending.
    pub fn is_filtering(&self) -> bool {
        self.debounce.is_armed()
    }

    /// Set one field's filter value and arm the debounce deadline.
    ///
    /// # Errors
    ///
    /// `UnknownField` when no spec has this key; `KindMismatch` when the
    /// value shape does not fit the field's kind. Neither stores anything.
    pub fn set_filter(&mut self, key: &str, value: FilterValue) -> Result<()> {
        let field = self
            .fields
            .iter()
            .find(|field| field.key == key)
            .ok_or_else(|| FilterError::UnknownField(key.to_string()))?;
        if !value.matches_kind(field.kind) {
            return Err(FilterError::KindMismatch {
                key: key.to_string(),
                kind: field.kind,
            });
        }
        self.values.insert(key.to_string(), value);
        self.debounce.arm();
        Ok(())
    }

    /// Set the free-text query and arm the debounce deadline.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.debounce.arm();
    }

    /// Restore every field to its initial value, clear the query, and fire
    /// the change notification immediately. Any pending debounce deadline
    /// is dropped.
    pub fn reset_filters(&mut self) {
        for field in &self.fields {
            self.values.insert(field.key.clone(), field.initial_value());
        }
        self.search_query.clear();
        self.debounce.disarm();
        tracing::debug!("filters reset");
        self.notify();
    }

    /// Poll the debounce deadline; fires the change callback once the quiet
    /// window has elapsed. Returns whether a notification fired.
    pub fn tick(&mut self) -> bool {
        if self.debounce.poll() {
            self.notify();
            return true;
        }
        false
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let Some(callback) = &mut self.on_change {
            callback(&snapshot);
        }
    }

    /// Current filters plus search query.
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            filters: self.values.clone(),
            search_query: self.search_query.clone(),
        }
    }

    /// Count of populated filter criteria: the search query (0 or 1) plus
    /// every field whose value is active (a boolean only when `true`, a
    /// date range only when both ends are set).
    pub fn active_filters_count(&self) -> usize {
        let search = usize::from(!self.search_query.is_empty());
        let fields = self
            .fields
            .iter()
            .filter(|field| {
                self.values
                    .get(&field.key)
                    .is_some_and(FilterValue::is_active)
            })
            .count();
        search + fields
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filters_count() > 0
    }

    /// Filter a collection against the current criteria. Pure: no side
    /// effects, no debounce interaction.
    ///
    /// The free-text query keeps records where any string attribute
    /// contains it case-insensitively; each non-empty field then narrows
    /// further by its kind's matching rule, in field declaration order.
    pub fn apply_filters<'a, T: Record>(&self, data: &'a [T]) -> Vec<&'a T> {
        let mut kept: Vec<&T> = data.iter().collect();

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            kept.retain(|record| {
                record
                    .search_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(&query))
            });
        }

        for field in &self.fields {
            let Some(value) = self.values.get(&field.key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            kept.retain(|record| field_matches(*record, field, value));
        }

        kept
    }
}

/// Whether one record passes one populated filter field.
fn field_matches<T: Record>(record: &T, field: &FieldSpec, value: &FilterValue) -> bool {
    let attr = record.attribute(&field.key);
    match (field.kind, value) {
        (FieldKind::Text, FilterValue::Text(query)) => match attr {
            Some(Attr::Text(text)) => text.to_lowercase().contains(&query.to_lowercase()),
            _ => false,
        },
        (FieldKind::Select, FilterValue::Text(choice)) => {
            matches!(attr, Some(Attr::Text(text)) if text == choice)
        }
        (FieldKind::Number, FilterValue::Number(Some(expected))) => {
            matches!(attr, Some(Attr::Number(actual)) if actual == *expected)
        }
        (FieldKind::Boolean, FilterValue::Flag(expected)) => {
            matches!(attr, Some(Attr::Flag(actual)) if actual == *expected)
        }
        (FieldKind::Date, FilterValue::Date(Some(expected))) => {
            matches!(attr_date(attr), Some(actual) if actual == *expected)
        }
        (FieldKind::DateRange, FilterValue::DateRange(start, end)) => {
            // A half-filled range is applied but can never match.
            let (Some(start), Some(end)) = (start, end) else {
                return false;
            };
            matches!(attr_date(attr), Some(actual) if actual >= *start && actual <= *end)
        }
        // Value shape drifted from the field kind; keep the record.
        _ => true,
    }
}

/// Calendar date carried by a record attribute, if any. Dates arrive as
/// strings: plain `%Y-%m-%d`, or a date-time whose date component is used.
fn attr_date(attr: Option<Attr<'_>>) -> Option<NaiveDate> {
    let Some(Attr::Text(text)) = attr else {
        return None;
    };
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(moment) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(moment.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .map(|moment| moment.date())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;

    fn engine_with_log(window: Duration) -> (FilterEngine, Rc<RefCell<Vec<FilterSnapshot>>>) {
        let log: Rc<RefCell<Vec<FilterSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let engine = FilterEngine::new(vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::number("qty", "Quantity"),
        ])
        .unwrap()
        .with_debounce(window)
        .with_on_change(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
        (engine, log)
    }

    #[test]
    fn test_initialize_seeds_every_field() {
        let engine = FilterEngine::new(vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::boolean("active", "Active"),
            FieldSpec::date_range("created", "Created"),
        ])
        .unwrap();
        assert_eq!(
            engine.filter_value("name"),
            Some(&FilterValue::Text(String::new()))
        );
        assert_eq!(engine.filter_value("active"), Some(&FilterValue::Flag(false)));
        assert_eq!(
            engine.filter_value("created"),
            Some(&FilterValue::DateRange(None, None))
        );
        assert_eq!(engine.filters().len(), 3);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = FilterEngine::new(vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::number("name", "Name again"),
        ]);
        assert!(matches!(result, Err(FilterError::DuplicateField(key)) if key == "name"));
    }

    #[test]
    fn test_unknown_key_and_kind_mismatch_are_errors() {
        let mut engine = FilterEngine::new(vec![FieldSpec::number("qty", "Quantity")]).unwrap();
        assert!(matches!(
            engine.set_filter("missing", FilterValue::number(1.0)),
            Err(FilterError::UnknownField(_))
        ));
        assert!(matches!(
            engine.set_filter("qty", FilterValue::text("four")),
            Err(FilterError::KindMismatch { .. })
        ));
        // Nothing stored, nothing pending.
        assert_eq!(engine.filter_value("qty"), Some(&FilterValue::Number(None)));
        assert!(!engine.is_filtering());
    }

    #[test]
    fn test_rapid_mutations_coalesce_into_one_notification() {
        let (mut engine, log) = engine_with_log(Duration::from_millis(10));
        engine.set_filter("name", FilterValue::text("a")).unwrap();
        engine.set_filter("name", FilterValue::text("ab")).unwrap();
        engine.set_search_query("widget");
        assert!(engine.is_filtering());
        assert!(!engine.tick());
        assert!(log.borrow().is_empty());

        thread::sleep(Duration::from_millis(20));
        assert!(engine.tick());
        assert!(!engine.tick());

        let fired = log.borrow();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].search_query, "widget");
        assert_eq!(
            fired[0].filters.get("name"),
            Some(&FilterValue::text("ab"))
        );
    }

    #[test]
    fn test_reset_fires_immediately_and_clears_pending() {
        let (mut engine, log) = engine_with_log(Duration::from_millis(50));
        engine.set_filter("qty", FilterValue::number(4.0)).unwrap();
        engine.set_search_query("w");
        engine.reset_filters();

        assert!(!engine.is_filtering());
        assert_eq!(engine.active_filters_count(), 0);
        {
            let fired = log.borrow();
            assert_eq!(fired.len(), 1);
            assert_eq!(fired[0].search_query, "");
            assert_eq!(fired[0].filters.get("qty"), Some(&FilterValue::Number(None)));
        }

        // The superseded deadline must not fire a second notification.
        thread::sleep(Duration::from_millis(60));
        assert!(!engine.tick());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_active_filters_count() {
        let mut engine = FilterEngine::new(vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::boolean("active", "Active"),
            FieldSpec::date_range("created", "Created"),
        ])
        .unwrap();
        assert_eq!(engine.active_filters_count(), 0);
        assert!(!engine.has_active_filters());

        engine.set_search_query("w");
        engine.set_filter("name", FilterValue::text("bolt")).unwrap();
        // False flag and half-filled range stay inactive.
        engine.set_filter("active", FilterValue::Flag(false)).unwrap();
        engine
            .set_filter(
                "created",
                FilterValue::DateRange(NaiveDate::from_ymd_opt(2024, 1, 1), None),
            )
            .unwrap();
        assert_eq!(engine.active_filters_count(), 2);

        engine.set_filter("active", FilterValue::Flag(true)).unwrap();
        assert_eq!(engine.active_filters_count(), 3);
    }
}
