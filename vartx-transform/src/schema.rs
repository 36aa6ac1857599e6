//! Table schema of the rows produced by [crate::formatter::RowFormatter].

use serde::Serialize;

use vartx_core::models::CohortSet;
use vartx_core::models::call::{DEPTH_FIELD, FILTER_FIELD};

use crate::config::TransformConfig;
use crate::consts::{
    ALLELE_COUNT_FIELD, ALLELE_FREQUENCY_FIELD, ALLELE_NUMBER_FIELD, ALT_RECORD_FIELD,
    AMBIGUOUS_CALLS_FIELD, CALL_RECORD_FIELD, OVERLAPPING_CALLSETS_FIELD,
    REF_MATCH_CALLSETS_COUNT_FIELD, REF_MATCH_CALLSETS_FIELD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    Nullable,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub mode: FieldMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSchema>,
}

impl FieldSchema {
    pub fn nullable(name: &str, field_type: FieldType) -> Self {
        FieldSchema {
            name: name.to_string(),
            field_type,
            mode: FieldMode::Nullable,
            fields: vec![],
        }
    }

    pub fn repeated(name: &str, field_type: FieldType) -> Self {
        FieldSchema {
            mode: FieldMode::Repeated,
            ..FieldSchema::nullable(name, field_type)
        }
    }

    pub fn record(name: &str, fields: Vec<FieldSchema>) -> Self {
        FieldSchema {
            fields,
            ..FieldSchema::repeated(name, FieldType::Record)
        }
    }
}

///
/// Ordered field list of the output table for a given configuration and
/// cohort set. Per-cohort fields appear once per cohort, in cohort order.
///
pub fn table_schema(config: &TransformConfig, cohorts: &CohortSet) -> Vec<FieldSchema> {
    let call_fields = vec![
        FieldSchema::nullable("call_set_name", FieldType::String),
        FieldSchema::nullable("phaseset", FieldType::String),
        FieldSchema::repeated("genotype", FieldType::Integer),
        FieldSchema::repeated("genotype_likelihood", FieldType::Float),
        FieldSchema::repeated(FILTER_FIELD, FieldType::String),
        FieldSchema::nullable(DEPTH_FIELD, FieldType::Integer),
    ];

    let mut alt_fields = vec![FieldSchema::nullable("alternate_bases", FieldType::String)];
    alt_fields.extend(
        cohorts
            .iter()
            .map(|c| FieldSchema::nullable(&c.field_name(ALLELE_COUNT_FIELD), FieldType::Integer)),
    );
    alt_fields.extend(
        cohorts
            .iter()
            .map(|c| FieldSchema::nullable(&c.field_name(ALLELE_FREQUENCY_FIELD), FieldType::Float)),
    );

    let mut fields = vec![
        FieldSchema::nullable("variant_id", FieldType::String),
        FieldSchema::nullable("reference_name", FieldType::String),
        FieldSchema::nullable("start", FieldType::Integer),
        FieldSchema::nullable("end", FieldType::Integer),
        FieldSchema::nullable("reference_bases", FieldType::String),
        FieldSchema::repeated("alternate_bases", FieldType::String),
        FieldSchema::repeated("names", FieldType::String),
        FieldSchema::repeated("filter", FieldType::String),
        FieldSchema::nullable("quality", FieldType::Float),
        FieldSchema::nullable(AMBIGUOUS_CALLS_FIELD, FieldType::Boolean),
        FieldSchema::repeated(OVERLAPPING_CALLSETS_FIELD, FieldType::String),
    ];
    fields.extend(
        cohorts
            .iter()
            .map(|c| FieldSchema::nullable(&c.field_name(ALLELE_NUMBER_FIELD), FieldType::Integer)),
    );

    if config.summarize_ref_match_callsets {
        if config.ref_match_output.emits_callsets() {
            fields.push(FieldSchema::repeated(
                REF_MATCH_CALLSETS_FIELD,
                FieldType::String,
            ));
        }
        if config.ref_match_output.emits_counts() {
            fields.extend(cohorts.iter().map(|c| {
                FieldSchema::nullable(
                    &c.field_name(REF_MATCH_CALLSETS_COUNT_FIELD),
                    FieldType::Integer,
                )
            }));
        }
    }

    fields.push(FieldSchema::record(ALT_RECORD_FIELD, alt_fields));
    fields.push(FieldSchema::record(CALL_RECORD_FIELD, call_fields));
    fields
}
