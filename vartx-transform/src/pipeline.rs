//! Chaining of the four stages over single records and parallel batches.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use vartx_core::models::{CohortSet, Variant};

use crate::allele_stats::CohortAlleleStatistics;
use crate::ambiguity::AmbiguityDetector;
use crate::call_filter::CallFilter;
use crate::config::TransformConfig;
use crate::counters::{Counter, PipelineCounters};
use crate::errors::TransformError;
use crate::formatter::{OutputRow, RowFormatter};
use crate::schema::{FieldSchema, table_schema};

///
/// Runs call filtering, ambiguity detection, allele statistics and row
/// formatting for one run configuration.
///
/// A `Transformer` is immutable once built apart from its counters, so a
/// single instance is shared across all rayon workers of a batch.
///
pub struct Transformer {
    config: TransformConfig,
    cohorts: CohortSet,
    call_filter: CallFilter,
    detector: AmbiguityDetector,
    formatter: RowFormatter,
    counters: Arc<PipelineCounters>,
}

impl Transformer {
    pub fn new(config: TransformConfig, cohorts: CohortSet) -> Self {
        Transformer::with_counters(config, cohorts, Arc::new(PipelineCounters::new()))
    }

    pub fn with_counters(
        config: TransformConfig,
        cohorts: CohortSet,
        counters: Arc<PipelineCounters>,
    ) -> Self {
        Transformer {
            call_filter: CallFilter::from_config(&config, counters.clone()),
            detector: AmbiguityDetector::new(counters.clone()),
            formatter: RowFormatter::new(&config),
            config,
            cohorts,
            counters,
        }
    }

    /// Build a transformer, resolving cohorts from the configuration.
    pub fn from_config(config: TransformConfig) -> Result<Self, TransformError> {
        let cohorts = config.load_cohorts()?;
        Ok(Transformer::new(config, cohorts))
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn cohorts(&self) -> &CohortSet {
        &self.cohorts
    }

    pub fn counters(&self) -> Arc<PipelineCounters> {
        self.counters.clone()
    }

    pub fn schema(&self) -> Vec<FieldSchema> {
        table_schema(&self.config, &self.cohorts)
    }

    ///
    /// Transform a single variant. `Ok(None)` means the variant was dropped,
    /// either by the quality filter or for having no calls.
    ///
    pub fn transform(&self, variant: Variant) -> Result<Option<OutputRow>, TransformError> {
        let row = self.transform_record(variant)?;
        if row.is_some() {
            self.counters.increment(Counter::RowsEmitted);
        }
        Ok(row)
    }

    /// All stages for one record. Counts every record read, but not rows emitted.
    fn transform_record(&self, variant: Variant) -> Result<Option<OutputRow>, TransformError> {
        self.counters.increment(Counter::VariantsRead);

        let Some(variant) = self.call_filter.apply(variant) else {
            return Ok(None);
        };
        let Some(variant) = self.detector.detect(variant) else {
            return Ok(None);
        };

        let stats = variant.allele_statistics(&self.cohorts, &self.config)?;
        let row = self.formatter.format(variant, stats)?;

        Ok(Some(row))
    }

    ///
    /// Transform a batch in parallel. Rows come back in input order, minus
    /// dropped variants. The first error aborts the batch and emits no rows;
    /// records already attempted still count as read.
    ///
    pub fn transform_batch(
        &self,
        variants: Vec<Variant>,
    ) -> Result<Vec<OutputRow>, TransformError> {
        let batch_size = variants.len();
        let rows: Vec<Option<OutputRow>> = variants
            .into_par_iter()
            .map(|variant| self.transform_record(variant))
            .collect::<Result<_, _>>()?;

        let rows: Vec<OutputRow> = rows.into_iter().flatten().collect();
        self.counters.add(Counter::RowsEmitted, rows.len() as u64);
        debug!(
            "Transformed batch of {} variants into {} rows",
            batch_size,
            rows.len()
        );
        Ok(rows)
    }
}
