use crate::value::{infer_data_type, Value};
use chrono::NaiveDate;
use folio_model::DataType;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

#[test]
fn test_scalars_are_typed_at_ingestion() {
    assert_eq!(Value::from_node(&json!(42)), Value::Integer(42));
    assert_eq!(
        Value::from_node(&json!(12.5)),
        Value::Decimal(Decimal::from_str("12.5").unwrap())
    );
    assert_eq!(Value::from_node(&json!(true)), Value::Boolean(true));
    assert_eq!(Value::from_node(&json!(null)), Value::Null);
    assert_eq!(
        Value::from_node(&json!("2024-03-01")),
        Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    );
    assert_eq!(Value::from_node(&json!("2024-3-1")), Value::Text("2024-3-1".into()));
}

#[test]
fn test_scalar_arrays_join_as_text() {
    assert_eq!(Value::from_node(&json!(["a", 1, true])), Value::Text("a, 1, true".into()));
    assert_eq!(Value::from_node(&json!([])), Value::Null);
}

#[test]
fn test_nested_objects_flatten_to_dotted_keys() {
    let row = Value::row_from_node(&json!({
        "id": 1,
        "customer": {"name": "Acme", "address": {"city": "Oslo"}},
        "lines": [{"sku": "A"}, {"sku": "B"}]
    }));
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "customer.name", "customer.address.city", "lines"]);
    match &row["lines"] {
        Value::Table(rows) => assert_eq!(rows.len(), 2),
        other => panic!("expected a table, got {:?}", other),
    }
}

#[test]
fn test_text_renders_null_literally() {
    assert_eq!(Value::Null.text(), "null");
    assert_eq!(Value::Integer(-3).text(), "-3");
}

#[test]
fn test_numeric_text_is_readable_as_decimal() {
    assert_eq!(Value::from("12.50").as_decimal(), Some(Decimal::from_str("12.50").unwrap()));
    assert_eq!(Value::from("twelve").as_decimal(), None);
    assert_eq!(Value::Decimal(Decimal::from(4)).as_i64(), Some(4));
}

#[test]
fn test_column_type_inference_widens() {
    let ints = [Value::Integer(1), Value::Null, Value::Integer(2)];
    assert_eq!(infer_data_type(&ints), DataType::Integer);

    let mixed_numbers = [Value::Integer(1), Value::Decimal(Decimal::new(15, 1))];
    assert_eq!(infer_data_type(&mixed_numbers), DataType::Decimal);

    let mixed = [Value::Integer(1), Value::from("x")];
    assert_eq!(infer_data_type(&mixed), DataType::Text);

    assert_eq!(infer_data_type(&[Value::Null]), DataType::Text);
}

#[test]
fn test_total_order_ranks_kinds_before_values() {
    use std::cmp::Ordering;

    let mut values = vec![
        Value::from("b"),
        Value::Integer(7),
        Value::from("a"),
        Value::Decimal(Decimal::from_str("2.5").unwrap()),
        Value::Boolean(true),
        Value::Null,
        Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
    ];
    values.sort_by(Value::total_cmp);
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Boolean(true),
            Value::Decimal(Decimal::from_str("2.5").unwrap()),
            Value::Integer(7),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            Value::from("a"),
            Value::from("b"),
        ]
    );
    assert_eq!(Value::Integer(2).total_cmp(&Value::Decimal(Decimal::TWO)), Ordering::Equal);
}
