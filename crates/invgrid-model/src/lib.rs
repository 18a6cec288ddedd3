pub mod field;
pub mod sort;
pub mod value;

pub use field::{FieldKind, FieldSpec, SelectOption};
pub use sort::{SortOrder, SortSpec};
pub use value::FilterValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_initial_value_prefers_default() {
        let field = FieldSpec::select(
            "status",
            "Status",
            vec![SelectOption::new("A", "Active")],
        )
        .with_default(FilterValue::text("A"));
        assert_eq!(field.initial_value(), FilterValue::text("A"));

        let bare = FieldSpec::number("qty", "Quantity");
        assert_eq!(bare.initial_value(), FilterValue::Number(None));
    }

    #[test]
    fn field_spec_deserializes_from_schema_json() {
        let json = r#"{
            "key": "category",
            "label": "Category",
            "kind": "select",
            "options": [{"value": "FOOD", "text": "Food"}]
        }"#;
        let field: FieldSpec = serde_json::from_str(json).expect("deserialize field");
        assert_eq!(field.kind, FieldKind::Select);
        assert_eq!(field.options.len(), 1);
        assert!(field.default.is_none());
    }

    #[test]
    fn sort_order_parses_and_prints() {
        assert_eq!(SortOrder::from_descending(true).as_str(), "desc");
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
