//! The tabular path: an array of objects laid out against a column model.

use crate::context::AssemblyContext;
use folio_analyzer::infer_columns;
use folio_document::{DesignBuilder, Row};
use folio_layout::TableModel;

/// Uses `model` when it names columns, otherwise infers them from `rows`.
pub fn table_detail(
    context: &AssemblyContext,
    model: &TableModel,
    rows: &[Row],
    builder: DesignBuilder,
) -> (DesignBuilder, Vec<Row>) {
    let model = if model.columns.is_empty() {
        log::debug!("No columns configured; inferring from {} rows", rows.len());
        TableModel { columns: infer_columns(rows), ..model.clone() }
    } else {
        model.clone()
    };
    context.lay_out(&model, rows, context.page.content_width(), builder)
}
