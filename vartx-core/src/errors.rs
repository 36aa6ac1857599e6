use thiserror::Error;

#[derive(Error, Debug)]
pub enum VartxCoreError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing variant record: {0}")]
    VariantParseError(String),

    #[error("Error parsing cohort file at line {line}: {reason}")]
    CohortParseError { line: usize, reason: String },

    #[error("The empty cohort name is reserved for the all-samples cohort")]
    ReservedCohortName,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
