//! Projection of an annotated variant onto the flat output row.

use std::collections::BTreeMap;

use serde::Serialize;

use vartx_core::models::{Variant, VariantCall};

use crate::allele_stats::AlleleStatistics;
use crate::config::{RefMatchOutput, TransformConfig};
use crate::consts::{
    ALLELE_COUNT_FIELD, ALLELE_FREQUENCY_FIELD, ALLELE_NUMBER_FIELD, REF_MATCH_CALLSETS_COUNT_FIELD,
};
use crate::errors::TransformError;

/// One call record of an output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRow {
    pub call_set_name: String,
    pub phaseset: Option<String>,
    pub genotype: Vec<i32>,
    pub genotype_likelihood: Vec<f64>,
    #[serde(rename = "FILTER")]
    pub filter: Option<Vec<String>>,
    #[serde(rename = "DP")]
    pub depth: Option<i64>,
}

impl From<VariantCall> for CallRow {
    fn from(call: VariantCall) -> Self {
        CallRow {
            filter: call.filters().map(<[String]>::to_vec),
            depth: call.depth(),
            call_set_name: call.call_set_name,
            phaseset: call.phaseset,
            genotype: call.genotype,
            genotype_likelihood: call.genotype_likelihood,
        }
    }
}

/// One alternate allele record of an output row, with AC/AF per cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltRow {
    pub alternate_bases: String,
    #[serde(flatten)]
    pub allele_counts: BTreeMap<String, u32>,
    #[serde(flatten)]
    pub allele_frequencies: BTreeMap<String, f64>,
}

///
/// The flattened, schema-shaped projection of one variant.
///
/// Per-cohort values are keyed by their output field name, e.g. `AN` for the
/// all-samples cohort and `ANEUR` for a cohort named `EUR`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub variant_id: String,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    pub reference_bases: String,
    pub alternate_bases: Vec<String>,
    pub names: Vec<String>,
    pub filter: Vec<String>,
    pub quality: Option<f64>,
    #[serde(rename = "ambiguousCalls")]
    pub ambiguous_calls: bool,
    #[serde(rename = "overlappingCallsets")]
    pub overlapping_callsets: Vec<String>,
    #[serde(flatten)]
    pub allele_numbers: BTreeMap<String, u32>,
    #[serde(rename = "refMatchCallsets", skip_serializing_if = "Option::is_none")]
    pub ref_match_callsets: Option<Vec<String>>,
    #[serde(flatten)]
    pub ref_match_counts: BTreeMap<String, u32>,
    pub alt: Vec<AltRow>,
    pub call: Vec<CallRow>,
}

impl OutputRow {
    /// AN for the named cohort (`""` for all samples).
    pub fn allele_number(&self, cohort: &str) -> Option<u32> {
        self.allele_numbers
            .get(&format!("{}{}", ALLELE_NUMBER_FIELD, cohort))
            .copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub struct RowFormatter {
    summarize_ref_matches: bool,
    ref_match_output: RefMatchOutput,
}

impl RowFormatter {
    pub fn new(config: &TransformConfig) -> Self {
        RowFormatter {
            summarize_ref_matches: config.summarize_ref_match_callsets,
            ref_match_output: config.ref_match_output,
        }
    }

    ///
    /// Build the output row. The variant must already carry its ambiguous-calls
    /// flag; a missing flag means ambiguity detection did not run and is fatal.
    /// Per-cohort field names come from `stats`, which must cover every
    /// alternate of `variant`.
    ///
    pub fn format(
        &self,
        variant: Variant,
        stats: AlleleStatistics,
    ) -> Result<OutputRow, TransformError> {
        let ambiguous_calls = variant
            .ambiguous_calls
            .ok_or_else(|| TransformError::MissingAmbiguityFlag(variant.label()))?;

        let num_alts = variant.num_alternates();
        if let Some(mismatch) = stats.cohorts.iter().find(|c| {
            c.allele_counts.len() != num_alts || c.allele_frequencies.len() != num_alts
        }) {
            return Err(TransformError::StatisticsMismatch {
                variant: variant.label(),
                cohort: mismatch.cohort.clone(),
                expected: num_alts,
                found: if mismatch.allele_counts.len() != num_alts {
                    mismatch.allele_counts.len()
                } else {
                    mismatch.allele_frequencies.len()
                },
            });
        }

        let mut allele_numbers = BTreeMap::new();
        let mut ref_match_counts = BTreeMap::new();
        let mut alt: Vec<AltRow> = variant
            .alternate_bases
            .iter()
            .map(|bases| AltRow {
                alternate_bases: bases.clone(),
                allele_counts: BTreeMap::new(),
                allele_frequencies: BTreeMap::new(),
            })
            .collect();

        for cohort_stats in &stats.cohorts {
            allele_numbers.insert(
                cohort_stats.field_name(ALLELE_NUMBER_FIELD),
                cohort_stats.allele_number,
            );
            if let Some(count) = cohort_stats.ref_match_count {
                ref_match_counts.insert(
                    cohort_stats.field_name(REF_MATCH_CALLSETS_COUNT_FIELD),
                    count,
                );
            }

            let ac_field = cohort_stats.field_name(ALLELE_COUNT_FIELD);
            let af_field = cohort_stats.field_name(ALLELE_FREQUENCY_FIELD);
            let per_alt = cohort_stats
                .allele_counts
                .iter()
                .zip(&cohort_stats.allele_frequencies);
            for (row, (&count, &frequency)) in alt.iter_mut().zip(per_alt) {
                row.allele_counts.insert(ac_field.clone(), count);
                row.allele_frequencies.insert(af_field.clone(), frequency);
            }
        }

        let call = variant
            .calls
            .into_iter()
            .filter(|call| !(self.summarize_ref_matches && call.is_reference_match()))
            .map(CallRow::from)
            .collect();

        let ref_match_callsets = if self.ref_match_output.emits_callsets() {
            stats.ref_match_callsets
        } else {
            None
        };

        Ok(OutputRow {
            variant_id: variant.id,
            reference_name: variant.reference_name,
            start: variant.start,
            end: variant.end,
            reference_bases: variant.reference_bases,
            alternate_bases: variant.alternate_bases,
            names: variant.names,
            filter: variant.filter,
            quality: variant.quality,
            ambiguous_calls,
            overlapping_callsets: variant.overlapping_callsets,
            allele_numbers,
            ref_match_callsets,
            ref_match_counts,
            alt,
            call,
        })
    }
}
