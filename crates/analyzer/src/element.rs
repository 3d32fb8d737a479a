use folio_document::Row;
use folio_model::ChartType;
use serde::Serialize;

/// The four kinds of classified element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Header,
    KeyValue,
    Table,
    Chart,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Header => "Header",
            ElementKind::KeyValue => "KeyValue",
            ElementKind::Table => "Table",
            ElementKind::Chart => "Chart",
        }
    }
}

/// A chart detected in the input: the rows plus which fields to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub title: Option<String>,
    pub category_field: String,
    pub series: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ElementContent {
    Header,
    KeyValue(String),
    Table(Vec<Row>),
    Chart(ChartSpec),
}

/// One classified unit of a flattened document, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportElement {
    pub label: String,
    /// Nesting level of the source node; top-level keys are depth 1.
    pub depth: usize,
    pub content: ElementContent,
}

impl ReportElement {
    pub fn header(label: impl Into<String>, depth: usize) -> Self {
        Self { label: label.into(), depth, content: ElementContent::Header }
    }

    pub fn key_value(label: impl Into<String>, value: impl Into<String>, depth: usize) -> Self {
        Self { label: label.into(), depth, content: ElementContent::KeyValue(value.into()) }
    }

    pub fn table(label: impl Into<String>, rows: Vec<Row>, depth: usize) -> Self {
        Self { label: label.into(), depth, content: ElementContent::Table(rows) }
    }

    pub fn chart(label: impl Into<String>, spec: ChartSpec, depth: usize) -> Self {
        Self { label: label.into(), depth, content: ElementContent::Chart(spec) }
    }

    pub fn kind(&self) -> ElementKind {
        match self.content {
            ElementContent::Header => ElementKind::Header,
            ElementContent::KeyValue(_) => ElementKind::KeyValue,
            ElementContent::Table(_) => ElementKind::Table,
            ElementContent::Chart(_) => ElementKind::Chart,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.content {
            ElementContent::KeyValue(value) => Some(value),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<&[Row]> {
        match &self.content {
            ElementContent::Table(rows) => Some(rows),
            ElementContent::Chart(spec) => Some(&spec.rows),
            _ => None,
        }
    }
}
