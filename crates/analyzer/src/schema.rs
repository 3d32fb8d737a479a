//! Column inference for tables discovered in the input.

use folio_document::{infer_data_type, Row};
use folio_model::{ColumnSpec, DataType};
use folio_style::BuiltinStyle;
use itertools::Itertools;

/// One auto-width column per distinct key across `rows`, in first-seen
/// order, typed from the values the key holds.
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnSpec> {
    rows.iter()
        .flat_map(|row| row.keys())
        .unique()
        .map(|key| {
            let data_type = infer_data_type(rows.iter().filter_map(|row| row.get(key)));
            let column = ColumnSpec::new(key.as_str(), humanize(key)).with_data_type(data_type);
            match data_type {
                DataType::Integer => column.with_style(BuiltinStyle::DetailNumeric.name()),
                DataType::Decimal => column
                    .with_style(BuiltinStyle::DetailNumeric.name())
                    .with_format("#,##0.00"),
                _ => column.with_style(BuiltinStyle::Detail.name()),
            }
        })
        .collect()
}

/// Turns a field key into a column title: `unitPrice` and `unit_price`
/// both become `Unit Price`, `customer.name` becomes `Customer Name`.
pub fn humanize(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in key.chars() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.iter().map(|w| capitalize(w)).join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
