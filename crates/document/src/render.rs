use crate::design::ReportDesign;
use crate::expression::ExpressionError;
use crate::fill::FillData;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Design rejected: {0}")]
    Compile(String),
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),
    #[error("Fill error: {0}")]
    Fill(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}

/// The external collaborator that compiles, fills and exports a design.
///
/// The core never inspects what `export` writes.
pub trait ReportRenderer {
    type Compiled;
    type Filled;

    fn compile(&self, design: &ReportDesign) -> Result<Self::Compiled, RenderError>;

    fn fill(&self, compiled: &Self::Compiled, data: &FillData) -> Result<Self::Filled, RenderError>;

    fn export<W: Write>(&self, filled: &Self::Filled, writer: W) -> Result<(), RenderError>;

    /// Compile, fill and export in one call.
    fn render<W: Write>(
        &self,
        design: &ReportDesign,
        data: &FillData,
        writer: W,
    ) -> Result<(), RenderError> {
        let compiled = self.compile(design)?;
        let filled = self.fill(&compiled, data)?;
        self.export(&filled, writer)
    }
}
