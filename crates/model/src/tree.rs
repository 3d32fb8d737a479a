//! The read-only tree abstraction the analyzers consume. The core never
//! names a concrete parser type; `serde_json::Value` is one implementation.

use serde_json::Value as JsonValue;

/// A leaf value of the input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    /// A number in its shortest textual form, so callers choose the precision.
    Number(String),
    Text(&'a str),
}

impl Scalar<'_> {
    pub fn text(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.clone(),
            Scalar::Text(s) => s.to_string(),
        }
    }
}

pub trait TreeNode: Sized {
    fn is_object(&self) -> bool;

    fn is_array(&self) -> bool;

    fn is_scalar(&self) -> bool {
        !self.is_object() && !self.is_array()
    }

    /// Object fields in source insertion order. Empty for non-objects.
    fn fields(&self) -> impl Iterator<Item = (&str, &Self)> + '_;

    /// Array elements in order. Empty for non-arrays.
    fn elements(&self) -> impl Iterator<Item = &Self> + '_;

    fn element(&self, index: usize) -> Option<&Self>;

    fn get(&self, key: &str) -> Option<&Self>;

    /// Number of fields or elements; zero for scalars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn scalar(&self) -> Option<Scalar<'_>>;

    /// True for an array whose first element is an object.
    fn is_array_of_objects(&self) -> bool {
        self.is_array() && self.element(0).is_some_and(|first| first.is_object())
    }

    /// A display form of the node: scalars as their text, arrays as their
    /// elements joined with `", "`, objects as `key=value` pairs.
    fn text(&self) -> String {
        if let Some(scalar) = self.scalar() {
            return scalar.text();
        }
        if self.is_array() {
            return self.elements().map(|e| e.text()).collect::<Vec<_>>().join(", ");
        }
        self.fields()
            .map(|(k, v)| format!("{}={}", k, v.text()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TreeNode for JsonValue {
    fn is_object(&self) -> bool {
        self.is_object()
    }

    fn is_array(&self) -> bool {
        self.is_array()
    }

    fn fields(&self) -> impl Iterator<Item = (&str, &Self)> + '_ {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn elements(&self) -> impl Iterator<Item = &Self> + '_ {
        self.as_array().into_iter().flatten()
    }

    fn element(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn len(&self) -> usize {
        match self {
            JsonValue::Object(map) => map.len(),
            JsonValue::Array(items) => items.len(),
            _ => 0,
        }
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        match self {
            JsonValue::Null => Some(Scalar::Null),
            JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
            JsonValue::Number(n) => Some(Scalar::Number(n.to_string())),
            JsonValue::String(s) => Some(Scalar::Text(s)),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}
