//! The column layout engine: resolves column widths against the available
//! page width and builds the header, detail, group and summary bands of a
//! tabular document.

pub mod bands;
pub mod config;
pub mod groups;
pub mod highlight;
pub mod summary;
pub mod widths;

pub use config::LayoutConfig;
pub use groups::group_variable_name;
pub use summary::{report_variable_name, SHOW_SUMMARY};
pub use widths::{drop_unusable, resolve_widths, ResolvedColumn, WidthPlan};

use folio_document::{
    Band, ConditionalStyle, DesignBuilder, Element, Expression, FieldDecl, GroupDecl, Row, TextElement, Value,
    VariableDecl,
};
use folio_model::{field_name, ColumnSpec, DataType, GroupSpec, HighlightRule};
use folio_style::StyleRegistry;
use itertools::Itertools;
use serde::Deserialize;
use std::cmp::Ordering;

/// The column model of one tabular document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableModel {
    pub columns: Vec<ColumnSpec>,
    pub groups: Vec<GroupSpec>,
    pub highlight_rules: Vec<HighlightRule>,
}

impl TableModel {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns, ..Self::default() }
    }

    pub fn with_groups(self, groups: Vec<GroupSpec>) -> Self {
        Self { groups, ..self }
    }

    pub fn with_highlight_rules(self, highlight_rules: Vec<HighlightRule>) -> Self {
        Self { highlight_rules, ..self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnLayoutEngine {
    config: LayoutConfig,
}

impl ColumnLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays `model` out across `available_width` pixels. Never fails:
    /// configuration problems are logged and degraded.
    pub fn layout(&self, model: &TableModel, available_width: i32, styles: &StyleRegistry) -> ColumnLayout {
        let (resolved, plan) = resolve_widths(&model.columns, available_width);
        let columns = drop_unusable(resolved, &plan);
        log::debug!(
            "Resolved {} columns at {}px: fixed {}px, auto {}x{}px, slack {}px",
            columns.len(),
            available_width,
            plan.fixed_total,
            plan.auto_count,
            plan.auto_width,
            plan.slack
        );

        let mut fields: Vec<FieldDecl> = model
            .columns
            .iter()
            .map(|c| FieldDecl { name: c.field_name(), data_type: c.data_type })
            .collect();
        let mut field_paths: Vec<(String, String)> = model
            .columns
            .iter()
            .map(|c| (c.field_path.clone(), c.field_name()))
            .collect();
        for group in &model.groups {
            let name = field_name(&group.field_path);
            if !fields.iter().any(|f| f.name == name) {
                fields.push(FieldDecl { name: name.clone(), data_type: DataType::Text });
                field_paths.push((group.field_path.clone(), name));
            }
        }

        let row_styles = highlight::row_styles(&self.config, &model.highlight_rules, &model.columns);
        let mut variables = Vec::new();
        let mut groups = Vec::new();
        for (rank, group) in model.groups.iter().enumerate() {
            let layout =
                groups::group_layout(rank, group, &columns, available_width, &self.config, styles);
            variables.extend(layout.variables);
            groups.push(layout.decl);
        }
        let summary = summary::summary_band(&columns, &self.config).map(|(band, report_vars)| {
            variables.extend(report_vars);
            band
        });

        ColumnLayout {
            column_header: bands::column_header_band(&columns, &self.config),
            detail: bands::detail_band(&columns, &self.config, &row_styles, styles),
            columns,
            plan,
            fields,
            variables,
            groups,
            summary,
            field_paths,
            group_paths: model.groups.iter().map(|g| g.field_path.clone()).collect(),
        }
    }
}

/// The bands and declarations produced for one column model.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub columns: Vec<ResolvedColumn>,
    pub plan: WidthPlan,
    pub fields: Vec<FieldDecl>,
    pub variables: Vec<VariableDecl>,
    pub groups: Vec<GroupDecl>,
    pub column_header: Band,
    pub detail: Band,
    pub summary: Option<Band>,
    field_paths: Vec<(String, String)>,
    group_paths: Vec<String>,
}

impl ColumnLayout {
    /// Rewrites the detail cell bound to `field`.
    pub fn map_cell(mut self, field: &str, f: impl FnOnce(TextElement) -> TextElement) -> Self {
        let target = Expression::field(field_name(field));
        let mut f = Some(f);
        self.detail.elements = std::mem::take(&mut self.detail.elements)
            .into_iter()
            .map(|element| match element {
                Element::Text(text) if text.expression == target => match f.take() {
                    Some(f) => Element::Text(f(text)),
                    None => Element::Text(text),
                },
                other => other,
            })
            .collect();
        self
    }

    /// Appends `styles` to the conditional styles of every text cell.
    pub fn with_row_styles(mut self, styles: &[ConditionalStyle]) -> Self {
        for element in &mut self.detail.elements {
            if let Element::Text(text) = element {
                text.conditional_styles.extend_from_slice(styles);
            }
        }
        self
    }

    /// Declares every field, variable and group and installs the bands.
    pub fn apply(self, mut builder: DesignBuilder) -> DesignBuilder {
        for field in &self.fields {
            builder.add_field(field.name.as_str(), field.data_type);
        }
        for variable in self.variables {
            builder.add_variable(variable);
        }
        for group in self.groups {
            builder.add_group(group);
        }
        builder = builder.with_column_header(self.column_header).with_detail(self.detail);
        if let Some(summary) = self.summary {
            builder.add_parameter(SHOW_SUMMARY, DataType::Boolean, true);
            builder = builder.with_summary(summary);
        }
        builder
    }

    /// Projects `rows` onto the declared field names and stably sorts them
    /// by the group fields, outermost first, so groups partition correctly.
    pub fn prepare_rows(&self, rows: &[Row]) -> Vec<Row> {
        rows.iter()
            .map(|row| {
                self.field_paths
                    .iter()
                    .map(|(path, name)| (name.clone(), row.get(path).cloned().unwrap_or_default()))
                    .collect::<Row>()
            })
            .sorted_by(|a, b| {
                self.group_paths
                    .iter()
                    .map(|path| {
                        let name = field_name(path);
                        let left = a.get(&name).unwrap_or(&Value::Null);
                        let right = b.get(&name).unwrap_or(&Value::Null);
                        left.total_cmp(right)
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .collect()
    }
}

#[cfg(test)]
mod highlight_test;
#[cfg(test)]
mod widths_test;
