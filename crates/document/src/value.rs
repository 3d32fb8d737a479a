//! Typed fill values. Kinds are resolved once, when the input tree is
//! ingested, and carried as a closed enum from then on.

use crate::design::SubDocument;
use chrono::NaiveDate;
use folio_model::{DataType, Scalar, TreeNode};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

/// A row of fill data: field name to value, in insertion order.
pub type Row = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    /// Nested rows not yet bound to a sub-document.
    Table(Vec<Row>),
    /// Nested rows together with the sub-document that lays them out.
    Document(Box<SubDocument>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Parses a number from its textual form, preferring `i64` when exact.
pub fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .map(Value::Decimal)
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

impl Value {
    /// Converts a tree node into a typed value.
    ///
    /// Arrays of objects become `Table`, arrays of scalars become joined
    /// text, and ISO `YYYY-MM-DD` strings become `Date`.
    pub fn from_node<N: TreeNode>(node: &N) -> Value {
        if let Some(scalar) = node.scalar() {
            return match scalar {
                Scalar::Null => Value::Null,
                Scalar::Bool(b) => Value::Boolean(b),
                Scalar::Number(n) => parse_number(&n).unwrap_or(Value::Text(n)),
                Scalar::Text(s) => parse_iso_date(s)
                    .map(Value::Date)
                    .unwrap_or_else(|| Value::Text(s.to_string())),
            };
        }
        if node.is_array_of_objects() {
            return Value::Table(Self::rows_from_node(node));
        }
        if node.is_array() && node.is_empty() {
            return Value::Null;
        }
        Value::Text(node.text())
    }

    /// Converts an object node into a row, flattening nested objects into
    /// dotted keys (`customer.name`).
    pub fn row_from_node<N: TreeNode>(node: &N) -> Row {
        let mut row = Row::new();
        collect_row(node, "", &mut row);
        row
    }

    /// Converts an array node into rows. Non-object elements become a
    /// single-field row keyed `value`.
    pub fn rows_from_node<N: TreeNode>(node: &N) -> Vec<Row> {
        node.elements()
            .map(|element| {
                if element.is_object() {
                    Self::row_from_node(element)
                } else {
                    let mut row = Row::new();
                    row.insert("value".to_string(), Self::from_node(element));
                    row
                }
            })
            .collect()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(DataType::Text),
            Value::Integer(_) => Some(DataType::Integer),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Date(_) => Some(DataType::Date),
            Value::Table(_) | Value::Document(_) => Some(DataType::Table),
        }
    }

    /// The numeric value, also accepting numeric text.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(i) => Some(Decimal::from(*i)),
            Value::Decimal(d) => Some(*d),
            Value::Text(s) => match parse_number(s)? {
                Value::Integer(i) => Some(Decimal::from(i)),
                Value::Decimal(d) => Some(d),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The canonical text of the value; `Null` renders as `"null"`.
    pub fn text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Table(rows) => format!("[{} rows]", rows.len()),
            Value::Document(doc) => format!("[{} rows]", doc.rows.len()),
        }
    }

    /// Orders two values of compatible kinds. Numbers compare numerically
    /// across `Integer` and `Decimal`; `Null` sorts first.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::Integer(_) | Value::Decimal(_), Value::Integer(_) | Value::Decimal(_)) => {
                Some(self.as_decimal()?.cmp(&other.as_decimal()?))
            }
            _ => None,
        }
    }

    /// A total order for sorting: kinds rank
    /// `Null < Boolean < number < Date < Text < Table < Document`, and
    /// values of one kind order as in `compare`.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        self.kind_rank()
            .cmp(&other.kind_rank())
            .then_with(|| self.compare(other).unwrap_or_else(|| self.text().cmp(&other.text())))
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Decimal(_) => 2,
            Value::Date(_) => 3,
            Value::Text(_) => 4,
            Value::Table(_) => 5,
            Value::Document(_) => 6,
        }
    }
}

fn collect_row<N: TreeNode>(node: &N, prefix: &str, row: &mut Row) {
    for (key, child) in node.fields() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };
        if child.is_object() {
            collect_row(child, &path, row);
        } else {
            row.insert(path, Value::from_node(child));
        }
    }
}

/// Infers the column type of a field across rows: numeric kinds widen to
/// `Decimal`, any other mix widens to `Text`, all-null columns are `Text`.
pub fn infer_data_type<'a>(values: impl IntoIterator<Item = &'a Value>) -> DataType {
    values
        .into_iter()
        .filter_map(Value::data_type)
        .reduce(DataType::widen)
        .unwrap_or(DataType::Text)
}
