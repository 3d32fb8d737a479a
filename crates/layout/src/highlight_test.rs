use crate::config::LayoutConfig;
use crate::highlight::{row_styles, rule_condition};
use folio_document::{Expression, Row, Scope, Value};
use folio_model::{ColumnSpec, ComparisonOperator, DataType, HighlightRule};
use folio_types::Color;

struct RowScope {
    row: Row,
    count: i64,
}

impl Scope for RowScope {
    fn field(&self, name: &str) -> Option<Value> {
        self.row.get(name).cloned()
    }

    fn parameter(&self, _name: &str) -> Option<Value> {
        None
    }

    fn variable(&self, name: &str) -> Option<Value> {
        (name == "REPORT_COUNT").then_some(Value::Integer(self.count))
    }
}

fn scope(field: &str, value: Value) -> RowScope {
    let mut row = Row::new();
    row.insert(field.to_string(), value);
    RowScope { row, count: 1 }
}

#[test]
fn test_numeric_rule_compares_numerically() {
    let rule = HighlightRule::new("amount", ComparisonOperator::GreaterThan, "100", "#FF0000");
    let condition = rule_condition(&rule, DataType::Decimal);
    assert!(condition.evaluate_bool(&scope("amount", Value::Integer(250))).unwrap());
    assert!(!condition.evaluate_bool(&scope("amount", Value::Integer(99))).unwrap());
}

#[test]
fn test_non_numeric_value_on_numeric_field_is_always_false() {
    let rule = HighlightRule::new("amount", ComparisonOperator::Equals, "lots", "#FF0000");
    let condition = rule_condition(&rule, DataType::Integer);
    assert_eq!(condition, Expression::always_false());
    assert!(!condition.evaluate_bool(&scope("amount", Value::Integer(1))).unwrap());
}

#[test]
fn test_text_rules() {
    let contains = HighlightRule::new("status", ComparisonOperator::Contains, "late", "#FF0000");
    let condition = rule_condition(&contains, DataType::Text);
    assert!(condition.evaluate_bool(&scope("status", Value::from("very late"))).unwrap());

    let not_equals = HighlightRule::new("status", ComparisonOperator::NotEquals, "ok", "#FF0000");
    let condition = rule_condition(&not_equals, DataType::Text);
    assert!(!condition.evaluate_bool(&scope("status", Value::from("ok"))).unwrap());
}

#[test]
fn test_zebra_comes_first_and_bad_colors_fall_back() {
    let config = LayoutConfig { zebra_color: Some("#EEEEEE".into()), ..LayoutConfig::default() };
    let columns = vec![ColumnSpec::new("amount", "Amount").with_data_type(DataType::Integer)];
    let rules = vec![
        HighlightRule::new("amount", ComparisonOperator::LessThan, "0", "not-a-color"),
        HighlightRule::new("missing", ComparisonOperator::Equals, "x", "#000000"),
    ];
    let styles = row_styles(&config, &rules, &columns);
    assert_eq!(styles.len(), 2);
    assert_eq!(styles[0].background, Some(Color::rgb(0xEE, 0xEE, 0xEE)));
    assert_eq!(styles[1].background, Some(Color::rgb(0xFF, 0xFF, 0x99)));

    let mut even = scope("amount", Value::Integer(-5));
    even.count = 2;
    assert!(styles[0].condition.evaluate_bool(&even).unwrap());
    assert!(styles[1].condition.evaluate_bool(&even).unwrap());
}
