//! Removal of disqualified calls from a variant.
//!
//! Two independent policies:
//!
//! - quality: keep only calls whose FILTER list contains `PASS`. Non-variant
//!   segment records pass through untouched since they carry no comparable
//!   quality tag. A variant left without calls is suppressed.
//! - exclusion: drop calls from the listed call sets. A variant left without
//!   calls is still emitted; ambiguity detection drops it downstream.
//!
//! When both are enabled quality runs first.

use std::sync::Arc;

use fxhash::FxHashSet;

use vartx_core::models::Variant;

use crate::config::TransformConfig;
use crate::counters::{Counter, PipelineCounters};

pub struct CallFilter {
    omit_low_quality_calls: bool,
    excluded_call_sets: FxHashSet<String>,
    counters: Arc<PipelineCounters>,
}

impl CallFilter {
    /// A filter with both policies disabled.
    pub fn new(counters: Arc<PipelineCounters>) -> Self {
        CallFilter {
            omit_low_quality_calls: false,
            excluded_call_sets: FxHashSet::default(),
            counters,
        }
    }

    pub fn from_config(config: &TransformConfig, counters: Arc<PipelineCounters>) -> Self {
        CallFilter::new(counters)
            .with_quality_filter(config.omit_low_quality_calls)
            .with_excluded_call_sets(config.excluded_call_sets.iter().cloned())
    }

    pub fn with_quality_filter(mut self, enabled: bool) -> Self {
        self.omit_low_quality_calls = enabled;
        self
    }

    pub fn with_excluded_call_sets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_call_sets.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_active(&self) -> bool {
        self.omit_low_quality_calls || !self.excluded_call_sets.is_empty()
    }

    ///
    /// Apply the enabled policies. Returns `None` when the quality policy
    /// removed every call.
    ///
    pub fn apply(&self, variant: Variant) -> Option<Variant> {
        if !variant.has_calls() || !self.is_active() {
            return Some(variant);
        }

        let variant = if self.omit_low_quality_calls {
            self.filter_low_quality(variant)?
        } else {
            variant
        };

        if self.excluded_call_sets.is_empty() {
            Some(variant)
        } else {
            Some(self.filter_excluded(variant))
        }
    }

    fn filter_low_quality(&self, variant: Variant) -> Option<Variant> {
        if variant.is_non_variant_segment() {
            return Some(variant);
        }

        let before = variant.calls.len();
        let mut variant = variant;
        variant.calls.retain(|call| call.is_passing());
        self.counters.add(
            Counter::CallsFailingQuality,
            (before - variant.calls.len()) as u64,
        );

        if variant.calls.is_empty() {
            self.counters.increment(Counter::VariantsWithoutPassingCalls);
            return None;
        }

        Some(variant)
    }

    fn filter_excluded(&self, variant: Variant) -> Variant {
        let before = variant.calls.len();
        let mut variant = variant;
        variant
            .calls
            .retain(|call| !self.excluded_call_sets.contains(&call.call_set_name));
        self.counters
            .add(Counter::CallsExcluded, (before - variant.calls.len()) as u64);
        variant
    }
}
