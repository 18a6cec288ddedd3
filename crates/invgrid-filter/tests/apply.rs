//! Filtering semantics over in-memory JSON rows.

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{Value, json};

use invgrid_filter::FilterEngine;
use invgrid_model::{FieldSpec, FilterValue, SelectOption};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn names(rows: &[&Value]) -> Vec<String> {
    rows.iter()
        .map(|row| row["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn inventory_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("name", "Name"),
        FieldSpec::select(
            "status",
            "Status",
            vec![
                SelectOption::new("A", "Active"),
                SelectOption::new("B", "Blocked"),
            ],
        ),
        FieldSpec::number("qty", "Quantity"),
        FieldSpec::boolean("tracked", "Tracked"),
        FieldSpec::date("received", "Received"),
        FieldSpec::date_range("created", "Created"),
    ]
}

fn inventory_rows() -> Vec<Value> {
    vec![
        json!({
            "name": "Widget",
            "status": "A",
            "qty": 4,
            "tracked": true,
            "received": "2024-03-05",
            "created": "2024-01-10T08:30:00Z",
        }),
        json!({
            "name": "Gadget",
            "status": "B",
            "qty": 7,
            "tracked": false,
            "received": "2024-03-06",
            "created": "2024-02-20T16:00:00Z",
        }),
        json!({
            "name": "widgetry kit",
            "status": "A",
            "qty": 4,
            "tracked": false,
            "received": "2024-03-05T23:59:00Z",
            "created": "2024-03-01",
        }),
    ]
}

#[test]
fn select_filter_keeps_exact_matches() {
    let mut engine = FilterEngine::new(vec![FieldSpec::select(
        "status",
        "Status",
        vec![
            SelectOption::new("A", "Active"),
            SelectOption::new("B", "Blocked"),
        ],
    )])
    .unwrap();
    let data = vec![json!({"status": "A"}), json!({"status": "B"})];

    engine.set_filter("status", FilterValue::text("A")).unwrap();
    let kept = engine.apply_filters(&data);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["status"], "A");
}

#[test]
fn text_filter_is_case_insensitive_substring() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine.set_filter("name", FilterValue::text("WIDGET")).unwrap();
    assert_eq!(names(&engine.apply_filters(&rows)), ["Widget", "widgetry kit"]);
}

#[test]
fn search_query_scans_all_string_attributes() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    // "gad" appears only in Gadget's name; "2024-03-01" only in a created date.
    engine.set_search_query("gad");
    assert_eq!(names(&engine.apply_filters(&rows)), ["Gadget"]);

    engine.set_search_query("2024-03-01");
    assert_eq!(names(&engine.apply_filters(&rows)), ["widgetry kit"]);
}

#[test]
fn number_filter_requires_numeric_equality() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine.set_filter("qty", FilterValue::number(4.0)).unwrap();
    assert_eq!(names(&engine.apply_filters(&rows)), ["Widget", "widgetry kit"]);

    // Records without the attribute fail an active filter.
    let sparse = vec![json!({"name": "NoQty"})];
    assert!(engine.apply_filters(&sparse).is_empty());
}

#[test]
fn false_boolean_filter_still_applies() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine.set_filter("tracked", FilterValue::Flag(false)).unwrap();
    // Not counted as active, but it filters regardless.
    assert_eq!(engine.active_filters_count(), 0);
    assert_eq!(names(&engine.apply_filters(&rows)), ["Gadget", "widgetry kit"]);
}

#[test]
fn date_filter_compares_calendar_day_only() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine
        .set_filter("received", FilterValue::date(day(2024, 3, 5)))
        .unwrap();
    // Matches both the plain date and the late-evening timestamp.
    assert_eq!(names(&engine.apply_filters(&rows)), ["Widget", "widgetry kit"]);
}

#[test]
fn date_range_is_inclusive_of_both_bounds() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine
        .set_filter(
            "created",
            FilterValue::date_range(day(2024, 1, 10), day(2024, 2, 20)),
        )
        .unwrap();
    assert_eq!(names(&engine.apply_filters(&rows)), ["Widget", "Gadget"]);
}

#[test]
fn half_filled_date_range_matches_nothing() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine
        .set_filter(
            "created",
            FilterValue::DateRange(Some(day(2024, 1, 1)), None),
        )
        .unwrap();
    assert!(engine.apply_filters(&rows).is_empty());
}

#[test]
fn filters_intersect_with_search() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine.set_search_query("widget");
    engine.set_filter("status", FilterValue::text("A")).unwrap();
    engine.set_filter("tracked", FilterValue::Flag(true)).unwrap();
    assert_eq!(names(&engine.apply_filters(&rows)), ["Widget"]);
}

#[test]
fn apply_is_idempotent_on_stable_input() {
    let mut engine = FilterEngine::new(inventory_fields()).unwrap();
    let rows = inventory_rows();
    engine.set_search_query("e");
    engine.set_filter("qty", FilterValue::number(4.0)).unwrap();

    let first: Vec<Value> = engine.apply_filters(&rows).into_iter().cloned().collect();
    let second: Vec<Value> = engine.apply_filters(&rows).into_iter().cloned().collect();
    assert_eq!(first, second);
}

proptest! {
    /// Filtering twice with unchanged criteria yields the same rows in the
    /// same order, whatever the data and filter state.
    #[test]
    fn prop_apply_filters_idempotent(
        rows in prop::collection::vec(
            (
                "[a-d]{0,6}",
                0u8..8,
                prop::bool::ANY,
            ),
            0..24,
        ),
        search in "[a-d]{0,3}",
        name_filter in "[a-d]{0,3}",
        qty_filter in prop::option::of(0u8..8),
        tracked in prop::bool::ANY,
    ) {
        let data: Vec<Value> = rows
            .into_iter()
            .map(|(name, qty, tracked)| json!({"name": name, "qty": qty, "tracked": tracked}))
            .collect();

        let mut engine = FilterEngine::new(vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::number("qty", "Quantity"),
            FieldSpec::boolean("tracked", "Tracked"),
        ])
        .unwrap();
        engine.set_search_query(search);
        engine.set_filter("name", FilterValue::text(name_filter)).unwrap();
        engine
            .set_filter("qty", FilterValue::Number(qty_filter.map(f64::from)))
            .unwrap();
        engine.set_filter("tracked", FilterValue::Flag(tracked)).unwrap();

        let first: Vec<Value> = engine.apply_filters(&data).into_iter().cloned().collect();
        let second: Vec<Value> = engine.apply_filters(&data).into_iter().cloned().collect();
        prop_assert_eq!(first, second);
    }
}
