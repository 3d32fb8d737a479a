use crate::value::{Row, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// The data a design is filled with: detail rows plus parameter values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillData {
    pub rows: Vec<Row>,
    pub parameters: IndexMap<String, Value>,
}

impl FillData {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, parameters: IndexMap::new() }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}
