//! Recognises chart objects: `{"chartType": "bar", "data": [{..}, ..]}`
//! with optional `title`, `categoryField` and `series`.

use crate::element::ChartSpec;
use folio_document::{Row, Value};
use folio_model::{ChartType, TreeNode};

pub fn detect_chart<N: TreeNode>(node: &N) -> Option<ChartSpec> {
    if !node.is_object() {
        return None;
    }
    let chart_type = node
        .get("chartType")
        .and_then(|t| t.scalar())
        .and_then(|t| ChartType::parse(&t.text()))?;
    let data = node.get("data").filter(|d| d.is_array_of_objects())?;
    let rows = Value::rows_from_node(data);

    let title = node.get("title").and_then(|t| t.scalar()).map(|t| t.text());
    let category_field = node
        .get("categoryField")
        .and_then(|c| c.scalar())
        .map(|c| c.text())
        .or_else(|| first_field(&rows, |v| matches!(v, Value::Text(_) | Value::Date(_))))
        .unwrap_or_default();
    let series = match node.get("series").filter(|s| s.is_array()) {
        Some(series) => series.elements().map(|s| s.text()).collect(),
        None => numeric_fields(&rows),
    };

    Some(ChartSpec { chart_type, title, category_field, series, rows })
}

fn first_field(rows: &[Row], accept: impl Fn(&Value) -> bool) -> Option<String> {
    rows.first()?
        .iter()
        .find(|(_, value)| accept(value))
        .map(|(key, _)| key.clone())
}

fn numeric_fields(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| {
            row.iter()
                .filter(|(_, value)| matches!(value, Value::Integer(_) | Value::Decimal(_)))
                .map(|(key, _)| key.clone())
                .collect()
        })
        .unwrap_or_default()
}
