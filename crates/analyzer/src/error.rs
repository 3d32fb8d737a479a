use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Input is not a recognized budget hierarchy")]
    UnrecognizedBudget,
}
