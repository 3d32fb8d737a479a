use crate::budget::{TOTAL_ACTUAL, TOTAL_PLANNED};
use crate::DocumentAssembler;
use folio_document::{Element, Expression, Value};
use rust_decimal::Decimal;
use serde_json::json;

fn budget() -> serde_json::Value {
    json!([
        {"code": "600", "name": "Transport", "planned": 0, "actual": null, "children": [
            {"code": "60014", "name": "Roads", "planned": 500, "actual": 450},
            {"code": "60016", "name": "Bridges", "planned": 300, "actual": 100}
        ]},
        {"code": "700", "name": "Housing", "planned": 1000, "actual": 850}
    ])
}

#[test]
fn test_budget_rows_are_rolled_up_and_indented() {
    let doc = DocumentAssembler::new().assemble_budget(&budget()).unwrap();
    let rows = &doc.data.rows;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["planned"], Value::Decimal(Decimal::from(800)));
    assert_eq!(rows[0]["actual"], Value::Decimal(Decimal::from(550)));
    assert_eq!(rows[1]["indent"], Value::Integer(10));
    assert_eq!(rows[3]["executionPercent"], Value::Decimal(Decimal::new(8500, 2)));
}

#[test]
fn test_budget_summary_sums_top_level_rows_only() {
    let doc = DocumentAssembler::new().assemble_budget(&budget()).unwrap();
    let planned = doc.design.variable(TOTAL_PLANNED).unwrap();
    let Expression::Conditional { when, .. } = &planned.expression else {
        panic!("expected a level-1 guard");
    };
    assert_eq!(
        when.references(),
        vec![folio_document::Reference::Field("level".into())]
    );
    assert!(doc.design.variable(TOTAL_ACTUAL).is_some());
    assert!(doc.design.summary.is_some());
}

#[test]
fn test_name_cell_is_indented_and_rows_emphasised() {
    let doc = DocumentAssembler::new().assemble_budget(&budget()).unwrap();
    let detail = doc.design.detail.as_ref().unwrap();
    let name = detail
        .elements
        .iter()
        .find_map(|e| match e {
            Element::Text(t) if t.expression == Expression::field("name") => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(name.left_indent, Some(Expression::field("indent")));
    assert_eq!(name.conditional_styles.len(), 3);
}
