use crate::path::{field_name, resolve_path};
use crate::tree::{Scalar, TreeNode};
use crate::types::{Calculation, DataType};
use crate::column::{ColumnSpec, ColumnWidth};
use serde_json::json;

#[test]
fn test_fields_preserve_insertion_order() {
    let doc = json!({ "zeta": 1, "alpha": 2, "mid": 3 });
    let keys: Vec<&str> = doc.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_scalar_text_forms() {
    assert_eq!(json!(null).text(), "null");
    assert_eq!(json!(true).text(), "true");
    assert_eq!(json!(12.5).text(), "12.5");
    assert_eq!(json!(["a", 1, null]).text(), "a, 1, null");
    assert_eq!(json!("x").scalar(), Some(Scalar::Text("x")));
}

#[test]
fn test_array_of_objects_checks_first_element() {
    assert!(json!([{ "a": 1 }, 2]).is_array_of_objects());
    assert!(!json!([1, { "a": 1 }]).is_array_of_objects());
    assert!(!json!([]).is_array_of_objects());
}

#[test]
fn test_resolve_dotted_path() {
    let doc = json!({ "customer": { "address": { "city": "Oslo" } } });
    assert_eq!(resolve_path(&doc, "customer.address.city"), Some(&json!("Oslo")));
    assert_eq!(resolve_path(&doc, "customer.phone"), None);
    assert_eq!(field_name("customer.address.city"), "customer_address_city");
}

#[test]
fn test_column_width_regimes() {
    assert_eq!(ColumnSpec::new("a", "A").with_width(120).width_mode(), ColumnWidth::Fixed(120));
    assert_eq!(ColumnSpec::new("a", "A").width_mode(), ColumnWidth::Auto);
    assert_eq!(ColumnSpec::new("a", "A").hidden().width_mode(), ColumnWidth::Hidden);
}

#[test]
fn test_column_spec_deserializes_with_defaults_and_aliases() {
    let spec: ColumnSpec = serde_json::from_value(json!({
        "fieldPath": "amount",
        "title": "Amount",
        "dataType": "decimal",
        "reportAggregate": "sum",
        "groupAggregate": "avg"
    }))
    .unwrap();

    assert_eq!(spec.width, -1);
    assert_eq!(spec.data_type, DataType::Decimal);
    assert_eq!(spec.report_aggregate, Calculation::Sum);
    assert_eq!(spec.group_aggregate, Calculation::Average);
}

#[test]
fn test_data_type_widening() {
    assert_eq!(DataType::Integer.widen(DataType::Decimal), DataType::Decimal);
    assert_eq!(DataType::Integer.widen(DataType::Integer), DataType::Integer);
    assert_eq!(DataType::Date.widen(DataType::Integer), DataType::Text);
}
