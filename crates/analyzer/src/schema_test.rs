use crate::schema::{humanize, infer_columns};
use folio_document::Value;
use folio_model::DataType;
use serde_json::json;

#[test]
fn test_columns_are_union_of_keys_in_first_seen_order() {
    let rows = Value::rows_from_node(&json!([
        {"sku": "A", "qty": 1},
        {"sku": "B", "price": 2.5},
        {"qty": 3, "note": "late"}
    ]));
    let columns = infer_columns(&rows);
    let fields: Vec<&str> = columns.iter().map(|c| c.field_path.as_str()).collect();
    assert_eq!(fields, vec!["sku", "qty", "price", "note"]);
    assert_eq!(columns[1].data_type, DataType::Integer);
    assert_eq!(columns[2].data_type, DataType::Decimal);
    assert_eq!(columns[2].format.as_deref(), Some("#,##0.00"));
    assert_eq!(columns[2].style_ref, "detail-numeric");
    assert_eq!(columns[0].style_ref, "detail");
    assert!(columns.iter().all(|c| c.width < 0));
}

#[test]
fn test_humanize_titles() {
    assert_eq!(humanize("unitPrice"), "Unit Price");
    assert_eq!(humanize("unit_price"), "Unit Price");
    assert_eq!(humanize("customer.name"), "Customer Name");
    assert_eq!(humanize("id"), "Id");
}
