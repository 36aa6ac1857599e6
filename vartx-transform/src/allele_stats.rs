//! Cohort-partitioned allele statistics.
//!
//! For a cohort C let G be the multiset of genotype values from calls whose
//! call set is in C:
//!
//! - AN = number of values of G in `[0, N]` (no-calls excluded), plus 2 for
//!   every distinct merged overlapping call set in C. Only computed for SNPs,
//!   or for every variant when non-SNP frequencies are enabled; 0 otherwise.
//! - AC_k = number of values of G equal to k, for k in `1..=N`. Always computed.
//! - AF_k = AC_k / AN, or 0.0 when AN is 0.

use fxhash::FxHashSet;

use vartx_core::models::{Cohort, CohortSet, Variant};

use crate::config::TransformConfig;
use crate::consts::OVERLAP_PLOIDY;
use crate::errors::TransformError;

/// AN/AC/AF for one cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortStatistics {
    pub cohort: String,
    pub allele_number: u32,
    /// AC for alternates 1..=N, in alternate order.
    pub allele_counts: Vec<u32>,
    /// AF for alternates 1..=N, in alternate order.
    pub allele_frequencies: Vec<f64>,
    /// Reference-matching call sets in this cohort, when counts are requested.
    pub ref_match_count: Option<u32>,
}

/// Statistics for every configured cohort of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleStatistics {
    /// One entry per cohort, in [CohortSet] order.
    pub cohorts: Vec<CohortStatistics>,
    /// Reference-matching call set names, when summarization is enabled.
    pub ref_match_callsets: Option<Vec<String>>,
}

impl CohortStatistics {
    /// Output field name for this cohort, e.g. `AN` + `EUR` -> `ANEUR`.
    pub fn field_name(&self, base: &str) -> String {
        format!("{}{}", base, self.cohort)
    }
}

impl AlleleStatistics {
    pub fn for_cohort(&self, name: &str) -> Option<&CohortStatistics> {
        self.cohorts.iter().find(|c| c.cohort == name)
    }
}

pub fn allele_frequency(allele_count: u32, allele_number: u32) -> f64 {
    if allele_number > 0 {
        allele_count as f64 / allele_number as f64
    } else {
        0.0
    }
}

/// Trait for computing population-genetics statistics of a variant's calls.
pub trait CohortAlleleStatistics {
    /// Whether AN is computed for this variant under the given setting.
    fn allele_number_eligible(&self, compute_frequency_for_non_snps: bool) -> bool;

    /// AN/AC/AF for a single cohort. Assumes every genotype value is in `[-1, N]`.
    fn cohort_statistics(&self, cohort: &Cohort, compute_allele_number: bool)
    -> CohortStatistics;

    /// Call set names of calls whose genotype is entirely the reference allele.
    fn ref_match_callsets(&self) -> Vec<String>;

    ///
    /// Statistics for every cohort, with reference-match summarization as
    /// configured. Fails on genotype values outside `[-1, N]`.
    ///
    fn allele_statistics(
        &self,
        cohorts: &CohortSet,
        config: &TransformConfig,
    ) -> Result<AlleleStatistics, TransformError>;
}

impl CohortAlleleStatistics for Variant {
    fn allele_number_eligible(&self, compute_frequency_for_non_snps: bool) -> bool {
        compute_frequency_for_non_snps || self.is_snp()
    }

    fn cohort_statistics(
        &self,
        cohort: &Cohort,
        compute_allele_number: bool,
    ) -> CohortStatistics {
        let num_alts = self.num_alternates();

        // genotype_counts[i] holds the count of allele index i, 0 being the reference
        let mut genotype_counts = vec![0u32; num_alts + 1];
        for call in self.calls.iter().filter(|c| cohort.contains(&c.call_set_name)) {
            for &g in &call.genotype {
                if g >= 0 && (g as usize) <= num_alts {
                    genotype_counts[g as usize] += 1;
                }
            }
        }

        let allele_number = if compute_allele_number {
            let overlapping: FxHashSet<&str> = self
                .overlapping_callsets
                .iter()
                .map(String::as_str)
                .filter(|name| cohort.contains(name))
                .collect();
            genotype_counts.iter().sum::<u32>() + OVERLAP_PLOIDY * overlapping.len() as u32
        } else {
            0
        };

        let allele_counts: Vec<u32> = genotype_counts[1..].to_vec();
        let allele_frequencies = allele_counts
            .iter()
            .map(|&ac| allele_frequency(ac, allele_number))
            .collect();

        CohortStatistics {
            cohort: cohort.name().to_string(),
            allele_number,
            allele_counts,
            allele_frequencies,
            ref_match_count: None,
        }
    }

    fn ref_match_callsets(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter(|call| call.is_reference_match())
            .map(|call| call.call_set_name.clone())
            .collect()
    }

    fn allele_statistics(
        &self,
        cohorts: &CohortSet,
        config: &TransformConfig,
    ) -> Result<AlleleStatistics, TransformError> {
        if let Some((call, value)) = self.first_malformed_genotype() {
            return Err(TransformError::MalformedGenotype {
                variant: self.label(),
                call_set_name: call.call_set_name.clone(),
                value,
                num_alternates: self.num_alternates(),
            });
        }

        let compute_allele_number =
            self.allele_number_eligible(config.compute_frequency_for_non_snps);
        let ref_match_callsets = config
            .summarize_ref_match_callsets
            .then(|| self.ref_match_callsets());
        let count_ref_matches =
            config.summarize_ref_match_callsets && config.ref_match_output.emits_counts();

        let cohort_stats = cohorts
            .iter()
            .map(|cohort| {
                let mut stats = self.cohort_statistics(cohort, compute_allele_number);
                if count_ref_matches {
                    stats.ref_match_count = ref_match_callsets.as_ref().map(|names| {
                        names.iter().filter(|name| cohort.contains(name)).count() as u32
                    });
                }
                stats
            })
            .collect();

        Ok(AlleleStatistics {
            cohorts: cohort_stats,
            ref_match_callsets,
        })
    }
}
