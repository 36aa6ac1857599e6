//! Flagging of variants where one sample contributes more than one call.
//!
//! This does not happen in tidy datasets, but real data has the same
//! individual sequenced twice, conversion mistakes upstream, and reference
//! blocks merged onto a site the sample was already called at. Downstream
//! statistics for such variants may double-count a sample, so they are flagged.

use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use tracing::warn;

use vartx_core::models::Variant;

use crate::counters::{Counter, PipelineCounters};

/// Outcome of checking one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity<'a> {
    /// No calls at all; the variant is dropped.
    NoCalls,
    Clean,
    /// The named call set has more than one call on the variant.
    DuplicateCalls(&'a str),
    /// The named call set was merged in from an overlapping record and also
    /// has its own call on the variant.
    MergedOverlap(&'a str),
}

impl Ambiguity<'_> {
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            Ambiguity::DuplicateCalls(_) | Ambiguity::MergedOverlap(_)
        )
    }
}

///
/// Classify a variant. Stops at the first ambiguous call set found, in call order.
///
pub fn classify(variant: &Variant) -> Ambiguity<'_> {
    if !variant.has_calls() {
        return Ambiguity::NoCalls;
    }

    let mut calls_per_sample: FxHashMap<&str, usize> = FxHashMap::default();
    for call in &variant.calls {
        *calls_per_sample.entry(call.call_set_name.as_str()).or_insert(0) += 1;
    }

    if let Some(call) = variant
        .calls
        .iter()
        .find(|call| calls_per_sample[call.call_set_name.as_str()] > 1)
    {
        return Ambiguity::DuplicateCalls(&call.call_set_name);
    }

    let called: FxHashSet<&str> = calls_per_sample.into_keys().collect();
    if let Some(name) = variant
        .overlapping_callsets
        .iter()
        .find(|name| called.contains(name.as_str()))
    {
        return Ambiguity::MergedOverlap(name);
    }

    Ambiguity::Clean
}

pub struct AmbiguityDetector {
    counters: Arc<PipelineCounters>,
}

impl AmbiguityDetector {
    pub fn new(counters: Arc<PipelineCounters>) -> Self {
        AmbiguityDetector { counters }
    }

    ///
    /// Set the variant's ambiguous-calls flag. Variants without calls are
    /// dropped (`None`). Each ambiguous variant is counted once and its first
    /// offending call set logged.
    ///
    pub fn detect(&self, variant: Variant) -> Option<Variant> {
        let ambiguity = classify(&variant);
        match ambiguity {
            Ambiguity::NoCalls => {
                self.counters.increment(Counter::VariantsWithoutCalls);
                return None;
            }
            Ambiguity::Clean => {}
            Ambiguity::DuplicateCalls(name) => {
                warn!(
                    "Variant {} contains ambiguous calls for at least one genome: {}",
                    variant.label(),
                    name
                );
            }
            Ambiguity::MergedOverlap(name) => {
                warn!(
                    "Variant {} has a merged overlapping call set that is also called directly: {}",
                    variant.label(),
                    name
                );
            }
        }

        let ambiguous = ambiguity.is_ambiguous();
        if ambiguous {
            self.counters.increment(Counter::VariantsWithAmbiguousCalls);
        }

        Some(Variant {
            ambiguous_calls: Some(ambiguous),
            ..variant
        })
    }
}
