//! Conditional row styling: highlight rules and zebra striping.

use crate::config::LayoutConfig;
use folio_document::{CompareMode, CompareOp, ConditionalStyle, Expression, Value, REPORT_COUNT};
use folio_model::{field_name, ColumnSpec, ComparisonOperator, DataType, HighlightRule};
use rust_decimal::Decimal;
use std::str::FromStr;

/// The predicate for `rule`. The comparison is numeric when the rule's
/// column is numeric; a literal that does not parse as a number yields an
/// always-false condition instead of an error.
pub fn rule_condition(rule: &HighlightRule, data_type: DataType) -> Expression {
    let field = Expression::field(field_name(&rule.field));
    if rule.operator == ComparisonOperator::Contains {
        return Expression::contains(field, Expression::text(rule.value.as_str()));
    }
    let op = match rule.operator {
        ComparisonOperator::Equals => CompareOp::Eq,
        ComparisonOperator::NotEquals => CompareOp::Ne,
        ComparisonOperator::GreaterThan => CompareOp::Gt,
        ComparisonOperator::LessThan => CompareOp::Lt,
        ComparisonOperator::Contains => CompareOp::Eq,
    };
    if data_type.is_numeric() {
        match Decimal::from_str(rule.value.trim()) {
            Ok(literal) => Expression::compare(op, CompareMode::Numeric, field, Expression::literal(literal)),
            Err(_) => {
                log::warn!(
                    "Highlight value '{}' for numeric field '{}' is not a number; rule disabled",
                    rule.value,
                    rule.field
                );
                Expression::always_false()
            }
        }
    } else {
        Expression::compare(op, CompareMode::Text, field, Expression::text(rule.value.as_str()))
    }
}

/// Even-numbered rows by the running row counter.
pub fn zebra_condition() -> Expression {
    Expression::numeric_equals(
        Expression::modulo(Expression::variable(REPORT_COUNT), 2),
        Value::Integer(0),
    )
}

/// Conditional styles for detail cells: zebra striping first, then each
/// highlight rule in order, so a matching rule paints over the stripe.
/// Rules on fields that are not columns are skipped.
pub fn row_styles(
    config: &LayoutConfig,
    rules: &[HighlightRule],
    columns: &[ColumnSpec],
) -> Vec<ConditionalStyle> {
    let mut styles = Vec::new();
    if let Some(zebra) = &config.zebra_color {
        styles.push(ConditionalStyle::background(
            zebra_condition(),
            config.color_or_fallback(zebra),
        ));
    }
    for rule in rules {
        let Some(column) = columns.iter().find(|c| c.field_path == rule.field) else {
            log::warn!("Highlight rule references unknown field '{}'; skipped", rule.field);
            continue;
        };
        let color = config.color_or_fallback(&rule.background);
        styles.push(ConditionalStyle::background(rule_condition(rule, column.data_type), color));
    }
    styles
}
