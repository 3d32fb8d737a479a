//! The single mutable context of one assembly pass. Registries and
//! counters live here and never escape the pass.

use crate::config::AssemblerConfig;
use folio_analyzer::{infer_columns, ChartSpec};
use folio_document::{
    Band, ChartElement, DesignBuilder, Element, PageSetup, Row, SubDocument, Value,
};
use folio_layout::{ColumnLayoutEngine, TableModel};
use folio_model::{DataType, field_name};
use folio_style::StyleRegistry;
use folio_types::{AnchorId, Bounds};

pub struct AssemblyContext {
    pub config: AssemblerConfig,
    pub engine: ColumnLayoutEngine,
    pub page: PageSetup,
    pub styles: StyleRegistry,
    anchors: usize,
}

impl AssemblyContext {
    pub fn new(
        config: AssemblerConfig,
        engine: ColumnLayoutEngine,
        page: PageSetup,
        styles: StyleRegistry,
    ) -> Self {
        Self { config, engine, page, styles, anchors: 0 }
    }

    /// A builder for a top-level design sharing this pass's styles.
    pub fn builder(&self, name: &str) -> DesignBuilder {
        DesignBuilder::new(name, self.page, self.styles.clone())
    }

    /// A unique anchor for a heading: its slug plus a running number.
    pub fn next_anchor(&mut self, label: &str) -> AnchorId {
        self.anchors += 1;
        AnchorId::for_heading(label, self.anchors)
    }

    /// Lays `rows` out as a table `width` pixels wide with inferred columns.
    pub fn table_document(&self, name: &str, rows: &[Row], width: i32) -> SubDocument {
        self.model_document(name, &TableModel::new(infer_columns(rows)), rows, width)
    }

    /// Lays `rows` out with an explicit column model as an embedded
    /// sub-document.
    pub fn model_document(&self, name: &str, model: &TableModel, rows: &[Row], width: i32) -> SubDocument {
        let height = self.engine.config().row_height;
        let builder = DesignBuilder::new(name, PageSetup::embedded(width, height), self.styles.clone());
        let (builder, rows) = self.lay_out(model, rows, width, builder);
        SubDocument::new(builder.build(), rows)
    }

    /// Installs the column layout of `model` into `builder` and prepares
    /// the rows. Nested tables in the rows become sub-documents sized to
    /// their column, one level at a time.
    pub fn lay_out(
        &self,
        model: &TableModel,
        rows: &[Row],
        width: i32,
        builder: DesignBuilder,
    ) -> (DesignBuilder, Vec<Row>) {
        let layout = self.engine.layout(model, width, &self.styles);
        let nested: Vec<(String, i32)> = layout
            .columns
            .iter()
            .filter(|c| c.spec.data_type == DataType::Table)
            .map(|c| (c.spec.field_name(), c.width))
            .collect();
        let mut rows = layout.prepare_rows(rows);
        for row in &mut rows {
            for (field, width) in &nested {
                if let Some(value) = row.get_mut(field) {
                    embed_nested(self, field, value, *width);
                }
            }
        }
        (layout.apply(builder), rows)
    }

    /// A sub-document whose summary draws one chart over `spec.rows`.
    pub fn chart_document(&self, name: &str, spec: &ChartSpec, width: i32) -> SubDocument {
        let height = self.config.chart_height;
        let mut builder = DesignBuilder::new(name, PageSetup::embedded(width, height), self.styles.clone());
        let columns = infer_columns(&spec.rows);
        for column in &columns {
            builder.add_field(column.field_name(), column.data_type);
        }
        let chart = ChartElement {
            bounds: Bounds::new(0, 0, width, height),
            chart_type: spec.chart_type,
            title: spec.title.clone(),
            category_field: field_name(&spec.category_field),
            series: spec.series.iter().map(|s| field_name(s)).collect(),
        };
        let rows = spec
            .rows
            .iter()
            .map(|row| row.iter().map(|(k, v)| (field_name(k), v.clone())).collect())
            .collect();
        let summary = Band::new(height).unsplittable().with_element(Element::Chart(chart));
        SubDocument::new(builder.with_summary(summary).build(), rows)
    }
}

fn embed_nested(context: &AssemblyContext, field: &str, value: &mut Value, width: i32) {
    if let Value::Table(rows) = value {
        let document = context.table_document(field, rows, width);
        *value = Value::Document(Box::new(document));
    }
}
