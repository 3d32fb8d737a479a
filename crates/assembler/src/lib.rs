//! Turns analyzed input into a `ReportDesign` plus its fill data.
//!
//! Three entry points share one frame (title, optional table of contents,
//! company header, page footer): [`DocumentAssembler::assemble_elements`]
//! for arbitrary objects, [`DocumentAssembler::assemble_table`] for arrays
//! of records and [`DocumentAssembler::assemble_budget`] for coded budget
//! hierarchies.

pub mod budget;
pub mod config;
pub mod context;
pub mod error;
pub mod footer;
pub mod front_matter;
pub mod generic;
pub mod header;
pub mod tabular;

pub use config::AssemblerConfig;
pub use context::AssemblyContext;
pub use error::AssembleError;
pub use footer::{footer_condition, TOC_FIRST_PAGE};
pub use front_matter::TOC_PARAMETER;
pub use header::CompanyHeader;

use folio_analyzer::{BudgetAnalyzer, ReportElement, StructureAnalyzer};
use folio_document::{
    Band, DesignBuilder, Element, FillData, PageSetup, ReportDesign, Row, StaticTextElement,
    Value,
};
use folio_layout::{ColumnLayoutEngine, LayoutConfig, TableModel};
use folio_model::{DataType, TreeNode};
use folio_style::{BuiltinStyle, StyleRegistry};
use folio_types::{Bounds, TocEntry};

/// A design together with the data it is filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledDocument {
    pub design: ReportDesign,
    pub data: FillData,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    config: AssemblerConfig,
    layout: LayoutConfig,
    page: PageSetup,
    styles: StyleRegistry,
    table_model: TableModel,
    title: String,
    company: Option<CompanyHeader>,
    footer_text: String,
    toc: Vec<TocEntry>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(self, config: AssemblerConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_layout_config(self, layout: LayoutConfig) -> Self {
        Self { layout, ..self }
    }

    pub fn with_page(self, page: PageSetup) -> Self {
        Self { page, ..self }
    }

    /// Styles registered ahead of the built-ins, so they take precedence.
    pub fn with_styles(self, styles: StyleRegistry) -> Self {
        Self { styles, ..self }
    }

    pub fn with_table_model(self, table_model: TableModel) -> Self {
        Self { table_model, ..self }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self { title: title.into(), ..self }
    }

    pub fn with_company_header(self, company: CompanyHeader) -> Self {
        Self { company: Some(company), ..self }
    }

    pub fn with_footer_text(self, footer_text: impl Into<String>) -> Self {
        Self { footer_text: footer_text.into(), ..self }
    }

    pub fn with_toc(self, toc: Vec<TocEntry>) -> Self {
        Self { toc, ..self }
    }

    fn context(&self) -> AssemblyContext {
        let mut styles = self.styles.clone();
        for builtin in BuiltinStyle::ALL {
            styles.register(builtin.default_style());
        }
        styles.register(footer::page_number_style());
        AssemblyContext::new(
            self.config.clone(),
            ColumnLayoutEngine::new(self.layout.clone()),
            self.page,
            styles,
        )
    }

    /// Adds the title, page header and page footer bands and their
    /// parameters.
    fn frame(&self, context: &AssemblyContext, mut builder: DesignBuilder) -> (DesignBuilder, FillData) {
        let width = context.page.content_width();
        let with_toc = !self.toc.is_empty();
        let mut data = FillData::default();

        builder.add_parameter(TOC_FIRST_PAGE, DataType::Boolean, with_toc);
        data.parameters.insert(TOC_FIRST_PAGE.to_string(), Value::Boolean(with_toc));
        if with_toc {
            let toc = front_matter::toc_document(&self.toc, width, &context.config, &context.styles);
            builder.add_parameter(TOC_PARAMETER, DataType::Table, Value::Null);
            data.parameters.insert(TOC_PARAMETER.to_string(), Value::from(toc));
        }

        if !self.title.is_empty() || with_toc {
            builder = builder.with_title(front_matter::title_band(&self.title, with_toc, width, &context.config));
        }
        if let Some(company) = &self.company {
            builder = builder.with_page_header(header::page_header_band(company, width, &context.config));
        }
        let no_data = Band::new(context.config.key_value_height).with_element(Element::StaticText(
            StaticTextElement {
                bounds: Bounds::new(0, 0, width, context.config.key_value_height),
                text: "No data".to_string(),
                style: BuiltinStyle::KeyValue.name().to_string(),
            },
        ));
        let builder = builder
            .with_page_footer(footer::page_footer_band(&self.footer_text, width, &context.config))
            .with_no_data(no_data);
        (builder, data)
    }

    fn finish(&self, context: &AssemblyContext, builder: DesignBuilder, rows: Vec<Row>) -> AssembledDocument {
        let (builder, mut data) = self.frame(context, builder);
        data.rows = rows;
        let design = builder.build();
        log::debug!(
            "Assembled '{}': {} fields, {} variables, {} groups, {} rows",
            design.name,
            design.fields.len(),
            design.variables.len(),
            design.groups.len(),
            data.rows.len()
        );
        AssembledDocument { design, data }
    }

    fn name(&self, fallback: &str) -> String {
        if self.title.is_empty() {
            fallback.to_string()
        } else {
            self.title.clone()
        }
    }

    /// Assembles an already-flattened element sequence.
    pub fn assemble_sequence(&self, elements: impl IntoIterator<Item = ReportElement>) -> AssembledDocument {
        let mut context = self.context();
        let builder = generic::element_detail(&context, context.builder(&self.name("document")));
        let rows: Vec<Row> = elements
            .into_iter()
            .map(|element| generic::element_row(&mut context, element))
            .collect();
        self.finish(&context, builder, rows)
    }

    /// The generic path. `root` must be an object.
    pub fn assemble_elements<N: TreeNode>(&self, root: &N) -> Result<AssembledDocument, AssembleError> {
        if !root.is_object() {
            return Err(AssembleError::InvalidInput(
                "generic documents must be built from an object".to_string(),
            ));
        }
        let elements = StructureAnalyzer::new()
            .with_scalar_arrays(self.config.scalar_arrays)
            .flatten(root)?;
        Ok(self.assemble_sequence(elements))
    }

    /// The tabular path. `root` must be an array of objects.
    pub fn assemble_table<N: TreeNode>(&self, root: &N) -> Result<AssembledDocument, AssembleError> {
        if !root.is_array_of_objects() {
            return Err(AssembleError::InvalidInput(
                "tables must be built from an array of objects".to_string(),
            ));
        }
        let context = self.context();
        let rows = Value::rows_from_node(root);
        let (builder, rows) =
            tabular::table_detail(&context, &self.table_model, &rows, context.builder(&self.name("table")));
        Ok(self.finish(&context, builder, rows))
    }

    /// The budget path. `root` must be a recognized budget hierarchy.
    pub fn assemble_budget<N: TreeNode>(&self, root: &N) -> Result<AssembledDocument, AssembleError> {
        let analyzer = BudgetAnalyzer::new(self.config.indent_unit);
        if !analyzer.is_recognized(root) {
            return Err(AssembleError::InvalidInput(
                "input is not a recognized budget hierarchy".to_string(),
            ));
        }
        let mut tree = analyzer.build_tree(root)?;
        analyzer.calculate_aggregates(&mut tree);
        let rows = analyzer.rows(&tree);
        let context = self.context();
        let (builder, rows) = budget::budget_detail(&context, &rows, context.builder(&self.name("budget")));
        Ok(self.finish(&context, builder, rows))
    }
}

#[cfg(test)]
mod budget_test;
