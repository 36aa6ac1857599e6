//! # Core data model for vartx
//!
//! Variants, calls and cohorts as they come out of the non-variant segment merge,
//! plus small file helpers shared by the transform crate and the CLI.
//!
//! ```no_run
//! use vartx_core::models::{CohortSet, Variant};
//!
//! let cohorts = CohortSet::try_from("cohorts.tsv").unwrap();
//! let variant = Variant::from_json(r#"{"reference_name": "13", "start": 100, "end": 101}"#).unwrap();
//! assert!(variant.is_non_variant_segment());
//! assert!(cohorts.len() >= 1);
//! ```
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use errors::VartxCoreError;
pub use models::{Cohort, CohortSet, Variant, VariantCall};
