//! Lock-free run counters shared by all workers of a pipeline.
//!
//! Counters only ever increase and never feed back into record processing.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    VariantsRead,
    /// Variants whose calls all failed the quality filter.
    VariantsWithoutPassingCalls,
    CallsFailingQuality,
    CallsExcluded,
    /// Variants dropped by ambiguity detection because they had no calls left.
    VariantsWithoutCalls,
    VariantsWithAmbiguousCalls,
    RowsEmitted,
}

#[derive(Debug, Default)]
pub struct PipelineCounters {
    variants_read: AtomicU64,
    variants_without_passing_calls: AtomicU64,
    calls_failing_quality: AtomicU64,
    calls_excluded: AtomicU64,
    variants_without_calls: AtomicU64,
    variants_with_ambiguous_calls: AtomicU64,
    rows_emitted: AtomicU64,
}

/// Point-in-time copy of [PipelineCounters].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CounterSnapshot {
    pub variants_read: u64,
    pub variants_without_passing_calls: u64,
    pub calls_failing_quality: u64,
    pub calls_excluded: u64,
    pub variants_without_calls: u64,
    pub variants_with_ambiguous_calls: u64,
    pub rows_emitted: u64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::VariantsRead => &self.variants_read,
            Counter::VariantsWithoutPassingCalls => &self.variants_without_passing_calls,
            Counter::CallsFailingQuality => &self.calls_failing_quality,
            Counter::CallsExcluded => &self.calls_excluded,
            Counter::VariantsWithoutCalls => &self.variants_without_calls,
            Counter::VariantsWithAmbiguousCalls => &self.variants_with_ambiguous_calls,
            Counter::RowsEmitted => &self.rows_emitted,
        }
    }

    pub fn add(&self, counter: Counter, n: u64) {
        if n > 0 {
            self.slot(counter).fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn increment(&self, counter: Counter) {
        self.add(counter, 1);
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            variants_read: self.get(Counter::VariantsRead),
            variants_without_passing_calls: self.get(Counter::VariantsWithoutPassingCalls),
            calls_failing_quality: self.get(Counter::CallsFailingQuality),
            calls_excluded: self.get(Counter::CallsExcluded),
            variants_without_calls: self.get(Counter::VariantsWithoutCalls),
            variants_with_ambiguous_calls: self.get(Counter::VariantsWithAmbiguousCalls),
            rows_emitted: self.get(Counter::RowsEmitted),
        }
    }
}
