use crate::path::field_name;
use crate::types::{Calculation, ComparisonOperator, DataType};
use serde::{Deserialize, Serialize};

/// Width value marking an auto column.
pub const AUTO_WIDTH: i32 = -1;

/// The three width regimes encoded by `ColumnSpec::width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// A fixed width in pixels.
    Fixed(i32),
    /// An equal share of the width left over by fixed columns.
    Auto,
    /// Excluded from layout; the field may still be declared.
    Hidden,
}

fn auto_width() -> i32 {
    AUTO_WIDTH
}

/// One column of a tabular layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Dot-separated path to the value inside a row (`customer.name`).
    pub field_path: String,
    #[serde(default)]
    pub title: String,
    /// `> 0` fixed pixels, `< 0` auto, `0` hidden.
    #[serde(default = "auto_width")]
    pub width: i32,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub report_aggregate: Calculation,
    #[serde(default)]
    pub group_aggregate: Calculation,
    /// Name of a registered style; empty means the built-in detail style.
    #[serde(default)]
    pub style_ref: String,
}

impl ColumnSpec {
    pub fn new(field_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            title: title.into(),
            width: AUTO_WIDTH,
            data_type: DataType::Text,
            format: None,
            report_aggregate: Calculation::None,
            group_aggregate: Calculation::None,
            style_ref: String::new(),
        }
    }

    pub fn with_width(self, width: i32) -> Self {
        Self { width, ..self }
    }

    pub fn auto(self) -> Self {
        self.with_width(AUTO_WIDTH)
    }

    pub fn hidden(self) -> Self {
        self.with_width(0)
    }

    pub fn with_data_type(self, data_type: DataType) -> Self {
        Self { data_type, ..self }
    }

    pub fn with_format(self, format: impl Into<String>) -> Self {
        Self { format: Some(format.into()), ..self }
    }

    pub fn with_report_aggregate(self, report_aggregate: Calculation) -> Self {
        Self { report_aggregate, ..self }
    }

    pub fn with_group_aggregate(self, group_aggregate: Calculation) -> Self {
        Self { group_aggregate, ..self }
    }

    pub fn with_style(self, style_ref: impl Into<String>) -> Self {
        Self { style_ref: style_ref.into(), ..self }
    }

    pub fn width_mode(&self) -> ColumnWidth {
        match self.width {
            w if w > 0 => ColumnWidth::Fixed(w),
            w if w < 0 => ColumnWidth::Auto,
            _ => ColumnWidth::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width != 0
    }

    /// Declaration-safe name derived from the field path.
    pub fn field_name(&self) -> String {
        field_name(&self.field_path)
    }
}

/// A data partition on equality of `field_path`. Groups nest in list order,
/// outermost first; a group's indentation rank is its list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub field_path: String,
    /// Label template for the group header; `{value}` is replaced by the group key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_expression: Option<String>,
    #[serde(default)]
    pub style_ref: String,
    #[serde(default = "default_true")]
    pub show_header: bool,
    #[serde(default)]
    pub show_footer_aggregates: bool,
}

fn default_true() -> bool {
    true
}

impl GroupSpec {
    pub fn new(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            header_expression: None,
            style_ref: String::new(),
            show_header: true,
            show_footer_aggregates: false,
        }
    }

    pub fn with_header_expression(self, template: impl Into<String>) -> Self {
        Self { header_expression: Some(template.into()), ..self }
    }

    pub fn with_style(self, style_ref: impl Into<String>) -> Self {
        Self { style_ref: style_ref.into(), ..self }
    }

    pub fn with_header(self, show_header: bool) -> Self {
        Self { show_header, ..self }
    }

    pub fn with_footer_aggregates(self, show_footer_aggregates: bool) -> Self {
        Self { show_footer_aggregates, ..self }
    }

    /// The group's declaration name.
    pub fn name(&self) -> String {
        format!("group_{}", field_name(&self.field_path))
    }
}

/// A conditional background applied to detail rows whose `field` satisfies
/// `operator` against the literal `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRule {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: String,
    pub background: String,
}

impl HighlightRule {
    pub fn new(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            background: background.into(),
        }
    }
}
