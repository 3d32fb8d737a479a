//! Selects an assembly path for a JSON input and hands the result to a
//! rendering collaborator.

mod builder;

pub use builder::PipelineBuilder;

use crate::error::PipelineError;
use folio_analyzer::BudgetAnalyzer;
use folio_assembler::{AssembledDocument, DocumentAssembler};
use folio_document::ReportRenderer;
use folio_model::TreeNode;
use std::io::Write;

/// The assembly path chosen for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Budget,
    Table,
    Elements,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    assembler: DocumentAssembler,
    budget: BudgetAnalyzer,
}

impl Pipeline {
    pub(crate) fn new(assembler: DocumentAssembler, indent_unit: i32) -> Self {
        Self { assembler, budget: BudgetAnalyzer::new(indent_unit) }
    }

    /// Budget hierarchies take precedence over plain record arrays, since a
    /// budget may itself be an array of records.
    pub fn classify<N: TreeNode>(&self, input: &N) -> DocumentKind {
        if self.budget.is_recognized(input) {
            DocumentKind::Budget
        } else if input.is_array_of_objects() {
            DocumentKind::Table
        } else {
            DocumentKind::Elements
        }
    }

    pub fn assemble<N: TreeNode>(&self, input: &N) -> Result<AssembledDocument, PipelineError> {
        let kind = self.classify(input);
        log::info!("Assembling input as {:?}", kind);
        let document = match kind {
            DocumentKind::Budget => self.assembler.assemble_budget(input)?,
            DocumentKind::Table => self.assembler.assemble_table(input)?,
            DocumentKind::Elements => self.assembler.assemble_elements(input)?,
        };
        Ok(document)
    }

    /// Parses `source` as JSON before assembling it.
    pub fn assemble_str(&self, source: &str) -> Result<AssembledDocument, PipelineError> {
        let input: serde_json::Value = serde_json::from_str(source)?;
        self.assemble(&input)
    }

    /// Assembles `input` and renders it through `renderer` into `writer`.
    pub fn generate<N, R, W>(&self, input: &N, renderer: &R, writer: W) -> Result<(), PipelineError>
    where
        N: TreeNode,
        R: ReportRenderer,
        W: Write,
    {
        let document = self.assemble(input)?;
        renderer.render(&document.design, &document.data, writer)?;
        Ok(())
    }
}
