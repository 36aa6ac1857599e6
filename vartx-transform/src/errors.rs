use thiserror::Error;

use vartx_core::VartxCoreError;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error(
        "Variant {variant} has genotype value {value} for call set '{call_set_name}', outside [-1, {num_alternates}]"
    )]
    MalformedGenotype {
        variant: String,
        call_set_name: String,
        value: i32,
        num_alternates: usize,
    },

    #[error(
        "Statistics for cohort '{cohort}' of variant {variant} cover {found} alternates, expected {expected}"
    )]
    StatisticsMismatch {
        variant: String,
        cohort: String,
        expected: usize,
        found: usize,
    },

    #[error("Variant {0} reached row formatting without an ambiguous-calls flag")]
    MissingAmbiguityFlag(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] VartxCoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
