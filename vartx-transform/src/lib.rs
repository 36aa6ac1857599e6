//! # Variant transformation stages
//!
//! Turns merged variant records into flat rows with per-cohort allele
//! statistics. Records go through four stages, in order:
//!
//! 1. [call_filter::CallFilter] drops low-quality and excluded calls
//! 2. [ambiguity::AmbiguityDetector] flags variants where a sample contributes
//!    more than one call
//! 3. [allele_stats::CohortAlleleStatistics] computes AN/AC/AF per cohort
//! 4. [formatter::RowFormatter] projects the variant onto an [formatter::OutputRow]
//!
//! [pipeline::Transformer] chains them and runs batches in parallel.
//!
//! ```
//! use vartx_core::models::{CohortSet, Variant, VariantCall};
//! use vartx_transform::{TransformConfig, Transformer};
//!
//! let transformer = Transformer::new(TransformConfig::default(), CohortSet::new());
//! let variant = Variant {
//!     reference_name: "chr1".to_string(),
//!     start: 100,
//!     end: 101,
//!     reference_bases: "A".to_string(),
//!     alternate_bases: vec!["G".to_string()],
//!     calls: vec![VariantCall::new("NA12878", vec![0, 1])],
//!     ..Default::default()
//! };
//!
//! let row = transformer.transform(variant).unwrap().unwrap();
//! assert_eq!(row.allele_number(""), Some(2));
//! ```
pub mod allele_stats;
pub mod ambiguity;
pub mod call_filter;
pub mod config;
pub mod consts;
pub mod counters;
pub mod errors;
pub mod formatter;
pub mod pipeline;
pub mod schema;

// re-exports
pub use allele_stats::{AlleleStatistics, CohortAlleleStatistics, CohortStatistics};
pub use config::{RefMatchOutput, TransformConfig};
pub use counters::{Counter, CounterSnapshot, PipelineCounters};
pub use errors::TransformError;
pub use formatter::OutputRow;
pub use pipeline::Transformer;
pub use schema::{FieldSchema, table_schema};
